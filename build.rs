fn main() {
    // Hand-declared prost messages, so no .proto file: describe the service
    // manually and let tonic-build generate the server trait and client.
    let method = |name: &str, route: &str, input: &str, output: &str| {
        tonic_build::manual::Method::builder()
            .name(name)
            .route_name(route)
            .input_type(input)
            .output_type(output)
            .codec_path("tonic::codec::ProstCodec")
    };

    let service = tonic_build::manual::Service::builder()
        .name("LaptopService")
        .package("techschool.pcbook")
        .method(
            method(
                "create_laptop",
                "CreateLaptop",
                "crate::rpc::CreateLaptopRequest",
                "crate::rpc::CreateLaptopResponse",
            )
            .build(),
        )
        .method(
            method(
                "search_laptop",
                "SearchLaptop",
                "crate::rpc::SearchLaptopRequest",
                "crate::rpc::SearchLaptopResponse",
            )
            .server_streaming()
            .build(),
        )
        .method(
            method(
                "upload_image",
                "UploadImage",
                "crate::rpc::UploadImageRequest",
                "crate::rpc::UploadImageResponse",
            )
            .client_streaming()
            .build(),
        )
        .method(
            method(
                "rate_laptop",
                "RateLaptop",
                "crate::rpc::RateLaptopRequest",
                "crate::rpc::RateLaptopResponse",
            )
            .client_streaming()
            .server_streaming()
            .build(),
        )
        .build();

    tonic_build::manual::Builder::new().compile(&[service]);
}

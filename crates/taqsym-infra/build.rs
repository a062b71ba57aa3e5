// Generates the gRPC client and server stubs from proto/.

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "grpc")]
    {
        println!("cargo:rerun-if-changed=proto/");

        tonic_build::configure()
            .build_server(true)
            .build_client(true)
            .compile_protos(&["proto/auth.proto", "proto/task.proto"], &["proto"])?;
    }

    Ok(())
}

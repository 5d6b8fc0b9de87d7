//! Velvet POS host entry point.
//!
//! Everything real lives in the library so bridge handlers stay testable by
//! direct invocation; this binary just starts the runtime.

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    velvet_host::run().await
}

//! # Checkout Host Entry Point
//!
//! Runs the scripted checkout demo. The actual setup lives in lib.rs for
//! testability.

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match checkout_host::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("checkout-host: {}", e.to_json());
            ExitCode::FAILURE
        }
    }
}

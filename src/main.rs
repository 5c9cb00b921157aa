//! CSS Property Validator Binary

use csspv::{EnhancedCli, ValidationError};
use std::process;

fn main() {
    let mut cli = EnhancedCli::new();
    match cli.run() {
        Ok(()) => {}
        Err(ValidationError::Io(e)) => {
            eprintln!("IO Error: {}", e);
            process::exit(1);
        }
        Err(e) => {
            eprintln!("❌ {}", e);
            process::exit(1);
        }
    }
}

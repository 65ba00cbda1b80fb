//! Version command implementation

use crate::config::CONFIG_FILE_NAME;
use crate::error::Result;
use crate::validate::PAYLOAD_EXTENSION;

/// Run version command
pub fn run() -> Result<()> {
    println!("msipack {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Payload format: .{PAYLOAD_EXTENSION} (Windows Installer)");
    println!("Configuration:  {CONFIG_FILE_NAME} (or MSIPACK_CONFIG / --config)");
    println!("Profile:        {}", build_profile());

    Ok(())
}

fn build_profile() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    }
}

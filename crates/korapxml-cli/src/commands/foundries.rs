//! Foundries command
//!
//! Usage: korapxml foundries

use korapxml_core::FoundryRegistry;

/// Print every registered foundry name, one per line
pub fn execute() -> Result<(), Box<dyn std::error::Error>> {
    for name in FoundryRegistry::builtin().names() {
        println!("{}", name);
    }
    Ok(())
}

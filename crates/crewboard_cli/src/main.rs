//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `crewboard_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("crewboard_core ping={}", crewboard_core::ping());
    println!("crewboard_core version={}", crewboard_core::core_version());
}

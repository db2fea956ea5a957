//! Build script for helpful
//!
//! Embeds build-time information (git commit, dirty status, build timestamp)
//! shown by `helpful --version`.

fn main() {
    shadow_rs::ShadowBuilder::builder()
        .build()
        .expect("Failed to generate build info");
}

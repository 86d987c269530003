//! Batch black-background removal CLI tool
//!
//! Converts images with a solid black background into images with a
//! transparent background, across a whole directory tree.

#[cfg(feature = "cli")]
fn main() -> anyhow::Result<()> {
    unblack::cli::main()
}

#[cfg(not(feature = "cli"))]
fn main() {
    panic!("CLI feature not enabled. Please rebuild with --features cli");
}

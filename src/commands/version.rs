//! Version command implementation

use crate::config::{EditorKind, PackConfig};
use crate::error::Result;

/// Run version command
pub fn run() -> Result<()> {
    let defaults = PackConfig::default();

    println!("athena-pack {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Build info:");
    println!("  Minimum Rust: {}", env!("CARGO_PKG_RUST_VERSION"));
    println!("  Profile: {}", build_profile());
    println!(
        "  Target: {}-{}",
        std::env::consts::ARCH,
        std::env::consts::OS
    );
    println!();
    println!("Defaults:");
    println!("  Freezer: {}", defaults.freezer);
    println!("  Plist editor: {}", editor_label(EditorKind::Auto.resolve()));

    Ok(())
}

fn editor_label(kind: EditorKind) -> &'static str {
    match kind {
        EditorKind::Plutil => "plutil",
        EditorKind::Native | EditorKind::Auto => "native",
    }
}

fn build_profile() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editor_label() {
        assert_eq!(editor_label(EditorKind::Plutil), "plutil");
        assert_eq!(editor_label(EditorKind::Native), "native");
    }
}

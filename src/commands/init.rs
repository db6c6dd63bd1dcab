//! Init command implementation

use anyhow::Result;
use posterform::{Config, CONFIG_FILE_NAME};
use std::path::Path;

/// Run the init command
pub fn run_init(force: bool) -> Result<()> {
    write_config(Path::new(CONFIG_FILE_NAME), force)
}

fn write_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        println!(
            "📄 Configuration file already exists: {} (use --force to overwrite)",
            path.display()
        );
        return Ok(());
    }

    Config::generate_default(path)?;
    println!("✅ Created configuration: {}", path.display());
    println!("\nEdit [github] repository to send requests to your own fork.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_write_config_creates_loadable_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        write_config(&path, false).unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.form.default_distance, "29000");
    }

    #[test]
    fn test_write_config_keeps_existing_without_force() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "palette = \"nord\"\n").unwrap();

        write_config(&path, false).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "palette = \"nord\"\n");

        write_config(&path, true).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().palette, "cyberpunk");
    }
}

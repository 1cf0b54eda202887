//! Server configuration loaded from the environment

use std::path::PathBuf;

/// Runtime configuration for the overlay service
///
/// Every setting has a default, so the server starts with no
/// environment at all. `.env` files are loaded before this is read.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// TCP port to listen on (`PORT`)
    pub port: u16,
    /// Directory for downloaded source documents (`UPLOAD_DIR`)
    pub upload_dir: PathBuf,
    /// Directory for rendered output documents (`OUTPUT_DIR`)
    pub output_dir: PathBuf,
    /// TrueType font file embedded into every output (`FONT_PATH`)
    pub font_path: PathBuf,
    /// Resource name the font is registered under (`FONT_NAME`)
    pub font_name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            upload_dir: PathBuf::from("uploads"),
            output_dir: PathBuf::from("output"),
            font_path: PathBuf::from("fonts/Janna.ttf"),
            font_name: overlay::DEFAULT_FONT_NAME.to_string(),
        }
    }
}

impl ServerConfig {
    /// Build a configuration from environment variables, falling back to
    /// defaults for anything unset or unparseable
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            upload_dir: std::env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.upload_dir),
            output_dir: std::env::var("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            font_path: std::env::var("FONT_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.font_path),
            font_name: std::env::var("FONT_NAME").unwrap_or(defaults.font_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.upload_dir, PathBuf::from("uploads"));
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert_eq!(config.font_path, PathBuf::from("fonts/Janna.ttf"));
        assert_eq!(config.font_name, "Janna");
    }
}

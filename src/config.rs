use std::path::{Path, PathBuf};

/// Where to read screen images from and where to write their patterns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupConfig {
    pub data_dir: PathBuf,
    pub out_dir: PathBuf,
    /// Prefix of each written `<tag>.<field>.pattern` file
    pub tag: String,
    /// Extension of the image files, without the dot
    pub extension: String,
}

impl GroupConfig {
    /// Defaults: patterns go to the current directory, tagged with the
    /// data directory's name, for `.tif` images
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        let tag = default_tag(&data_dir);
        GroupConfig {
            data_dir,
            out_dir: PathBuf::from("."),
            tag,
            extension: "tif".to_string(),
        }
    }

    pub fn with_out_dir(mut self, out_dir: impl Into<PathBuf>) -> Self {
        self.out_dir = out_dir.into();
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Path of the pattern file for one field
    pub fn pattern_path(&self, field: &str) -> PathBuf {
        self.out_dir.join(format!("{}.{}.pattern", self.tag, field))
    }
}

/// Last component of the directory, ignoring trailing separators and `.`
fn default_tag(dir: &Path) -> String {
    let normalized: PathBuf = dir.components().collect();
    normalized
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "screen".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GroupConfig::new("/data/idr0026/plate1/");
        assert_eq!(config.tag, "plate1");
        assert_eq!(config.extension, "tif");
        assert_eq!(config.out_dir, PathBuf::from("."));
    }

    #[test]
    fn test_builder() {
        let config = GroupConfig::new("/data/plate1")
            .with_out_dir("/tmp/out")
            .with_tag("run2")
            .with_extension("png");
        assert_eq!(
            config.pattern_path("03"),
            PathBuf::from("/tmp/out/run2.03.pattern")
        );
        assert_eq!(config.extension, "png");
    }

    #[test]
    fn test_tag_fallback() {
        assert_eq!(default_tag(Path::new("/")), "screen");
    }
}

//! Filename convention of the screen images
//!
//! Each image is named after its acquisition, channel, field and timepoint:
//!
//! ```text
//! 12-18-43_PMT - PMT [FD6_FDRED] [00]_Time Time0000.tif
//! ```

use crate::error::Result;
use regex::Regex;

/// The parts of one image filename
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ImageName {
    pub head: String,
    pub channel: String,
    pub field: String,
    pub timepoint: String,
}

#[derive(Debug, Clone)]
pub struct Convention {
    regex: Regex,
    extension: String,
}

impl Convention {
    /// Convention of the PMT time-lapse images, for files ending in `.{extension}`
    pub fn pmt(extension: &str) -> Result<Self> {
        let regex = Regex::new(&format!(
            r"^(?P<head>.*?_PMT)\s-\sPMT\s\[(?P<channel>.*?)\]\s\[(?P<field>[0-9]+)\]_Time\sTime(?P<timepoint>[0-9]+)\.{}$",
            regex::escape(extension)
        ))?;
        Ok(Convention {
            regex,
            extension: extension.to_string(),
        })
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Whether a file belongs to the screen at all
    pub fn wants(&self, name: &str) -> bool {
        name.strip_suffix(self.extension.as_str())
            .is_some_and(|stem| stem.ends_with('.'))
    }

    pub fn parse(&self, name: &str) -> Option<ImageName> {
        let caps = self.regex.captures(name)?;
        Some(ImageName {
            head: caps["head"].to_string(),
            channel: caps["channel"].to_string(),
            field: caps["field"].to_string(),
            timepoint: caps["timepoint"].to_string(),
        })
    }

    /// Pattern for a field given its channel and timepoint blocks
    pub fn pattern(&self, head: &str, channels: &str, field: &str, timepoints: &str) -> String {
        format!(
            "{} - PMT [{}] [{}]_Time Time{}.{}",
            head, channels, field, timepoints, self.extension
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_name() {
        let convention = Convention::pmt("tif").unwrap();
        let name = convention
            .parse("12-18-43_PMT - PMT [FD6_FDRED] [00]_Time Time0000.tif")
            .unwrap();
        assert_eq!(
            name,
            ImageName {
                head: "12-18-43_PMT".into(),
                channel: "FD6_FDRED".into(),
                field: "00".into(),
                timepoint: "0000".into(),
            }
        );
    }

    #[test]
    fn test_rejects_other_names() {
        let convention = Convention::pmt("tif").unwrap();
        assert!(convention.parse("notes.tif").is_none());
        assert!(convention
            .parse("12-18-43_PMT - PMT [FD6_FDRED] [00]_Time Time0000.png")
            .is_none());
        assert!(convention
            .parse("12-18-43_PMT - PMT [FD6_FDRED] [00]_Time Time0000Xtif")
            .is_none());
    }

    #[test]
    fn test_wants_extension() {
        let convention = Convention::pmt("tif").unwrap();
        assert!(convention.wants("a.tif"));
        assert!(!convention.wants("a.tiff"));
        assert!(!convention.wants("atif"));
    }

    #[test]
    fn test_pattern_layout() {
        let convention = Convention::pmt("tif").unwrap();
        assert_eq!(
            convention.pattern("h_PMT", "<a,b>", "03", "<0-9>"),
            "h_PMT - PMT [<a,b>] [03]_Time Time<0-9>.tif"
        );
    }
}

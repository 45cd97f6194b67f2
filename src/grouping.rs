//! Grouping of screen images into one pattern per field

use crate::config::GroupConfig;
use crate::convention::{Convention, ImageName};
use crate::error::{GroupError, Result};
use file_pattern::{build_literal_block, build_numeric_block, FilePattern};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Build the pattern for the images of a single field.
///
/// All images must come from one acquisition and cover every
/// channel/timepoint combination.
pub fn field_pattern(convention: &Convention, field: &str, images: &[ImageName]) -> Result<String> {
    let heads: BTreeSet<&str> = images.iter().map(|i| i.head.as_str()).collect();
    let channels: BTreeSet<&str> = images.iter().map(|i| i.channel.as_str()).collect();
    let timepoints: BTreeSet<&str> = images.iter().map(|i| i.timepoint.as_str()).collect();

    let head = match heads.iter().next() {
        Some(head) if heads.len() == 1 => *head,
        _ => {
            return Err(GroupError::MultipleHeads {
                field: field.to_string(),
                heads: heads.iter().map(|h| h.to_string()).collect(),
            })
        }
    };

    let found: BTreeSet<(&str, &str)> = images
        .iter()
        .map(|i| (i.channel.as_str(), i.timepoint.as_str()))
        .collect();
    let expected = channels.len() * timepoints.len();
    if found.len() != expected {
        return Err(GroupError::MissingImages {
            field: field.to_string(),
            expected,
            found: found.len(),
        });
    }

    let channel_block = build_literal_block(&channels)?;
    let timepoint_block = build_numeric_block(&timepoints);
    Ok(convention.pattern(head, &channel_block, field, &timepoint_block))
}

/// List the screen images of `config.data_dir` and build one pattern per
/// field, keyed by field.
///
/// Each pattern is prefixed with the data directory. Files whose names do
/// not follow the convention are logged and skipped. The patterns are
/// checked to expand to exactly the images that were grouped.
pub fn group_files(config: &GroupConfig) -> Result<BTreeMap<String, String>> {
    let convention = Convention::pmt(&config.extension)?;
    let data_dir = config
        .data_dir
        .to_str()
        .ok_or_else(|| GroupError::NonUtf8Path(config.data_dir.clone()))?;

    let entries = fs::read_dir(&config.data_dir).map_err(|source| GroupError::ReadDir {
        path: config.data_dir.clone(),
        source,
    })?;

    let mut fields: BTreeMap<String, Vec<ImageName>> = BTreeMap::new();
    let mut grouped = BTreeSet::new();
    for entry in entries {
        let entry = entry.map_err(|source| GroupError::ReadDir {
            path: config.data_dir.clone(),
            source,
        })?;
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            warn!(name = ?file_name, "skipping non UTF-8 filename");
            continue;
        };
        if !convention.wants(name) {
            continue;
        }
        let Some(image) = convention.parse(name) else {
            warn!(name, "unexpected pattern");
            continue;
        };
        grouped.insert(prefixed(data_dir, name));
        fields.entry(image.field.clone()).or_default().push(image);
    }
    debug!(images = grouped.len(), fields = fields.len(), "grouped screen images");

    let mut patterns = BTreeMap::new();
    for (field, images) in &fields {
        let pattern = prefixed(data_dir, &field_pattern(&convention, field, images)?);
        info!(field = %field, images = images.len(), pattern = %pattern, "built field pattern");
        patterns.insert(field.clone(), pattern);
    }

    let mut expanded = BTreeSet::new();
    for pattern in patterns.values() {
        expanded.extend(FilePattern::new(pattern.as_str())?.filenames());
    }
    if expanded != grouped {
        return Err(GroupError::Unaccounted {
            missing: grouped.difference(&expanded).cloned().collect(),
            unexpected: expanded.difference(&grouped).cloned().collect(),
        });
    }

    Ok(patterns)
}

fn prefixed(dir: &str, name: &str) -> String {
    PathBuf::from(dir).join(name).to_string_lossy().into_owned()
}

/// Group the screen images and write each field's pattern to
/// `<out_dir>/<tag>.<field>.pattern`, creating `out_dir` if needed.
///
/// Returns the written paths.
pub fn write_patterns(config: &GroupConfig) -> Result<Vec<PathBuf>> {
    let patterns = group_files(config)?;

    fs::create_dir_all(&config.out_dir).map_err(|source| GroupError::Write {
        path: config.out_dir.clone(),
        source,
    })?;

    let mut written = Vec::with_capacity(patterns.len());
    for (field, pattern) in &patterns {
        let path = config.pattern_path(field);
        fs::write(&path, format!("{}\n", pattern)).map_err(|source| GroupError::Write {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), "wrote pattern");
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::Path;
    use tempfile::TempDir;

    fn image(channel: &str, field: &str, t: &str) -> String {
        format!("12-18-43_PMT - PMT [{}] [{}]_Time Time{}.tif", channel, field, t)
    }

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"").unwrap();
    }

    fn screen(fields: &[&str], channels: &[&str], timepoints: usize) -> TempDir {
        let dir = TempDir::new().unwrap();
        for field in fields {
            for channel in channels {
                for t in 0..timepoints {
                    touch(dir.path(), &image(channel, field, &format!("{:04}", t)));
                }
            }
        }
        dir
    }

    #[test]
    fn test_one_pattern_per_field() {
        let dir = screen(&["00", "01"], &["FD6_FDRED", "FD6_FDGREEN"], 3);
        let config = GroupConfig::new(dir.path());
        let patterns = group_files(&config).unwrap();

        let prefix = dir.path().to_str().unwrap();
        assert_eq!(patterns.len(), 2);
        assert_eq!(
            patterns["00"],
            prefixed(
                prefix,
                "12-18-43_PMT - PMT [<FD6_FDGREEN,FD6_FDRED>] [00]_Time Time<0000-0002>.tif"
            )
        );
        assert!(patterns["01"].contains("[01]"));
    }

    #[test]
    fn test_single_channel() {
        let dir = screen(&["02"], &["FD6_FDRED"], 2);
        let patterns = group_files(&GroupConfig::new(dir.path())).unwrap();
        assert!(patterns["02"].ends_with("[FD6_FDRED] [02]_Time Time<0000,0001>.tif"));
    }

    #[test]
    fn test_unexpected_names_are_skipped() {
        let dir = screen(&["00"], &["R"], 3);
        touch(dir.path(), "overview.tif");
        touch(dir.path(), "notes.txt");
        let patterns = group_files(&GroupConfig::new(dir.path())).unwrap();
        assert_eq!(patterns.len(), 1);
    }

    #[test]
    fn test_missing_images() {
        let dir = screen(&["00"], &["R", "G"], 3);
        fs::remove_file(dir.path().join(image("G", "00", "0001"))).unwrap();
        let err = group_files(&GroupConfig::new(dir.path())).unwrap_err();
        assert!(matches!(
            err,
            GroupError::MissingImages {
                expected: 6,
                found: 5,
                ..
            }
        ));
    }

    #[test]
    fn test_multiple_heads() {
        let dir = screen(&["00"], &["R"], 2);
        touch(dir.path(), "09-00-00_PMT - PMT [R] [00]_Time Time0002.tif");
        let err = group_files(&GroupConfig::new(dir.path())).unwrap_err();
        let GroupError::MultipleHeads { field, heads } = err else {
            panic!("expected MultipleHeads");
        };
        assert_eq!(field, "00");
        assert_eq!(heads, ["09-00-00_PMT", "12-18-43_PMT"]);
    }

    #[test]
    fn test_gapped_timepoints() {
        let dir = TempDir::new().unwrap();
        for t in ["0000", "0002", "0004", "0010"] {
            touch(dir.path(), &image("R", "00", t));
        }
        let patterns = group_files(&GroupConfig::new(dir.path())).unwrap();
        assert!(patterns["00"].ends_with("Time<0000-0004:2,0010>.tif"));
    }

    #[test]
    fn test_reserved_channel_name() {
        let dir = screen(&["00"], &["FD-RED", "FD-GREEN"], 1);
        let err = group_files(&GroupConfig::new(dir.path())).unwrap_err();
        assert!(matches!(err, GroupError::Pattern(_)));
    }

    #[test]
    fn test_missing_directory() {
        let config = GroupConfig::new("/nonexistent/screen/dir");
        assert!(matches!(
            group_files(&config),
            Err(GroupError::ReadDir { .. })
        ));
    }

    #[test]
    fn test_write_patterns() {
        let dir = screen(&["00", "07"], &["R"], 4);
        let out = TempDir::new().unwrap();
        let out_dir = out.path().join("patterns");
        let config = GroupConfig::new(dir.path())
            .with_out_dir(&out_dir)
            .with_tag("plate1");

        let written = write_patterns(&config).unwrap();
        assert_eq!(
            written,
            [
                out_dir.join("plate1.00.pattern"),
                out_dir.join("plate1.07.pattern"),
            ]
        );

        let contents = fs::read_to_string(&written[1]).unwrap();
        assert!(contents.ends_with("[07]_Time Time<0000-0003>.tif\n"));
        let pattern = FilePattern::new(contents.trim_end()).unwrap();
        assert_eq!(pattern.filenames().count(), 4);
    }
}

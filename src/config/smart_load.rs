use figment::providers::{Data, Format, Json, Toml, Yaml};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Toml,
    Json,
    Yaml,
}

/// Configuration file provider that picks the format from the file extension,
/// sniffing the content when the extension says nothing.
pub fn auto<P: AsRef<Path>>(path: P) -> impl figment::Provider {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase();

    let format = match extension.as_str() {
        "toml" => FileFormat::Toml,
        "json" => FileFormat::Json,
        "yaml" | "yml" => FileFormat::Yaml,
        _ => match std::fs::read_to_string(path) {
            Ok(content) => detect_format_from_content(&content).unwrap_or_else(|| {
                tracing::debug!("Could not detect format of {}, assuming TOML", path.display());
                FileFormat::Toml
            }),
            Err(e) => {
                tracing::debug!("Could not read {} ({}), assuming TOML", path.display(), e);
                FileFormat::Toml
            }
        },
    };

    tracing::trace!("Loading {} as {:?}", path.display(), format);

    match format {
        FileFormat::Toml => SmartProvider::Toml(Toml::file(path)),
        FileFormat::Json => SmartProvider::Json(Json::file(path)),
        FileFormat::Yaml => SmartProvider::Yaml(Yaml::file(path)),
    }
}

/// Wrapper enum to handle different provider types
enum SmartProvider {
    Toml(Data<Toml>),
    Json(Data<Json>),
    Yaml(Data<Yaml>),
}

impl figment::Provider for SmartProvider {
    fn metadata(&self) -> figment::Metadata {
        match self {
            SmartProvider::Toml(p) => p.metadata(),
            SmartProvider::Json(p) => p.metadata(),
            SmartProvider::Yaml(p) => p.metadata(),
        }
    }

    fn data(&self) -> Result<figment::value::Map<figment::Profile, figment::value::Dict>, figment::Error> {
        match self {
            SmartProvider::Toml(p) => p.data(),
            SmartProvider::Json(p) => p.data(),
            SmartProvider::Yaml(p) => p.data(),
        }
    }
}

fn detect_format_from_content(content: &str) -> Option<FileFormat> {
    let trimmed = content.trim();

    if trimmed.starts_with('{') && trimmed.ends_with('}') {
        return Some(FileFormat::Json);
    }

    let lines = || trimmed.lines().map(str::trim).filter(|l| !l.is_empty() && !l.starts_with('#'));

    // TOML: [section] headers or key = value
    if lines().any(|line| (line.starts_with('[') && line.ends_with(']')) || (line.contains('=') && !line.contains(':'))) {
        return Some(FileFormat::Toml);
    }

    // YAML: document separator or key: value
    if trimmed.starts_with("---") || lines().any(|line| line.contains(':')) {
        return Some(FileFormat::Yaml);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_detection() {
        assert_eq!(detect_format_from_content(r#"{"workers": {"threads": 2}}"#), Some(FileFormat::Json));
        assert_eq!(detect_format_from_content("workers:\n  threads: 2"), Some(FileFormat::Yaml));
        assert_eq!(detect_format_from_content("[workers]\nthreads = 2"), Some(FileFormat::Toml));
        assert_eq!(detect_format_from_content("# comment\nthreads = 2"), Some(FileFormat::Toml));
        assert_eq!(detect_format_from_content("plain words"), None);
    }

    #[test]
    fn test_unknown_extension_is_sniffed() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("tally.conf", "workers:\n  threads: 7\n")?;
            let threads: usize = figment::Figment::from(auto("tally.conf")).extract_inner("workers.threads")?;
            assert_eq!(threads, 7);
            Ok(())
        });
    }
}

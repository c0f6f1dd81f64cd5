//! Network specification parser.
//!
//! Loads a [`NetworkSpec`] from a single YAML file or from a directory of
//! YAML fragments merged in filename order, with environment variable
//! overrides applied on top.

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{NettopoError, Result, SpecError};

use super::model::NetworkSpec;

/// Parser for loading network specifications.
#[derive(Debug, Default)]
pub struct SpecParser;

impl SpecParser {
    /// Creates a new specification parser.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Loads a specification from a file or a fragment directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the path does not exist or cannot be parsed.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<NetworkSpec> {
        let path = path.as_ref();
        if path.is_dir() {
            self.load_dir(path)
        } else {
            self.load_file(path)
        }
    }

    /// Loads a specification from a single YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<NetworkSpec> {
        let path = path.as_ref();
        info!("Loading network spec from: {}", path.display());

        if !path.exists() {
            return Err(NettopoError::Spec(SpecError::FileNotFound {
                path: path.to_path_buf(),
            }));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            NettopoError::Spec(SpecError::ParseError {
                message: format!("Failed to read file: {e}"),
                location: Some(path.display().to_string()),
            })
        })?;

        self.parse_yaml(&content, Some(path))
    }

    /// Loads a specification from a directory of YAML fragments.
    ///
    /// Fragments are merged shallowly in filename order, so a key in a
    /// later fragment replaces the same key from an earlier one.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory is missing, holds no fragments,
    /// or the merged document cannot be parsed.
    pub fn load_dir(&self, dir: impl AsRef<Path>) -> Result<NetworkSpec> {
        let dir = dir.as_ref();
        info!("Loading network spec fragments from: {}", dir.display());

        if !dir.is_dir() {
            return Err(NettopoError::Spec(SpecError::FileNotFound {
                path: dir.to_path_buf(),
            }));
        }

        let mut fragment_paths: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|p| {
                matches!(
                    p.extension().and_then(|e| e.to_str()),
                    Some("yaml" | "yml")
                )
            })
            .collect();
        fragment_paths.sort();

        if fragment_paths.is_empty() {
            return Err(NettopoError::Spec(SpecError::EmptySpecDir {
                path: dir.to_path_buf(),
            }));
        }

        let mut merged = serde_yaml::Mapping::new();
        for path in &fragment_paths {
            debug!("Merging spec fragment: {}", path.display());
            let content = std::fs::read_to_string(path)?;
            let value: serde_yaml::Value = serde_yaml::from_str(&content).map_err(|e| {
                NettopoError::Spec(SpecError::ParseError {
                    message: format!("YAML parse error: {e}"),
                    location: Some(path.display().to_string()),
                })
            })?;

            match value {
                serde_yaml::Value::Mapping(map) => {
                    for (key, entry) in map {
                        merged.insert(key, entry);
                    }
                }
                serde_yaml::Value::Null => {}
                _ => {
                    return Err(NettopoError::Spec(SpecError::ParseError {
                        message: String::from("Spec fragment must be a YAML mapping"),
                        location: Some(path.display().to_string()),
                    }));
                }
            }
        }

        let spec: NetworkSpec =
            serde_yaml::from_value(serde_yaml::Value::Mapping(merged)).map_err(|e| {
                NettopoError::Spec(SpecError::ParseError {
                    message: format!("Merged spec is invalid: {e}"),
                    location: Some(dir.display().to_string()),
                })
            })?;

        debug!(
            "Merged {} fragments into spec for network {}",
            fragment_paths.len(),
            spec.cidr_block
        );
        Ok(spec)
    }

    /// Parses a specification from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid.
    pub fn parse_yaml(&self, content: &str, source: Option<&Path>) -> Result<NetworkSpec> {
        debug!("Parsing network spec YAML");

        let spec: NetworkSpec = serde_yaml::from_str(content).map_err(|e| {
            let location = source.map(|p| p.display().to_string());
            NettopoError::Spec(SpecError::ParseError {
                message: format!("YAML parse error: {e}"),
                location,
            })
        })?;

        debug!("Parsed spec for network: {}", spec.cidr_block);
        Ok(spec)
    }

    /// Loads a specification with environment variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the spec cannot be loaded.
    pub fn load_with_env(&self, path: impl AsRef<Path>) -> Result<NetworkSpec> {
        let mut spec = self.load(path)?;
        Self::apply_env_overrides(&mut spec);
        Ok(spec)
    }

    /// Applies environment variable overrides to the specification.
    fn apply_env_overrides(spec: &mut NetworkSpec) {
        if let Ok(cidr) = std::env::var("NETTOPO_CIDR_BLOCK") {
            debug!("Overriding cidr_block from environment");
            spec.cidr_block = cidr;
        }

        if let Ok(destination) = std::env::var("NETTOPO_FLOW_LOG_DESTINATION") {
            debug!("Overriding flow_log_destination from environment");
            spec.flow_log_destination = Some(destination);
        }

        if let Ok(zone) = std::env::var("NETTOPO_HOSTED_ZONE_NAME") {
            debug!("Overriding hosted_zone_name from environment");
            spec.hosted_zone_name = Some(zone);
        }
    }
}

/// Default specification file names to search for.
pub const DEFAULT_SPEC_FILES: &[&str] = &[
    "nettopo.network.yaml",
    "nettopo.network.yml",
    "network.yaml",
    "network.yml",
];

/// Finds the specification file in the given directory or its parents.
///
/// # Errors
///
/// Returns an error if no specification file is found.
pub fn find_spec_file(start_dir: impl AsRef<Path>) -> Result<PathBuf> {
    let start = start_dir.as_ref();
    let mut current = start.to_path_buf();

    loop {
        for filename in DEFAULT_SPEC_FILES {
            let spec_path = current.join(filename);
            if spec_path.exists() {
                info!("Found network spec file: {}", spec_path.display());
                return Ok(spec_path);
            }
        }

        if !current.pop() {
            break;
        }
    }

    Err(NettopoError::Spec(SpecError::FileNotFound {
        path: start.join(DEFAULT_SPEC_FILES[0]),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::model::SubnetRole;

    #[test]
    fn test_parse_minimal_spec() {
        let yaml = r"
cidr_block: 10.0.0.0/16
availability_zones:
  - letter: A
    index: 0
";
        let parser = SpecParser::new();
        let result = parser.parse_yaml(yaml, None);
        assert!(result.is_ok());

        let spec = result.unwrap();
        assert_eq!(spec.cidr_block, "10.0.0.0/16");
        assert!(spec.dns_hostnames_enabled);
        assert!(spec.dns_support_enabled);
        assert!(spec.subnet_groups.is_empty());
    }

    #[test]
    fn test_parse_full_spec() {
        let yaml = r"
cidr_block: 172.16.0.0/24
availability_zones:
  - letter: A
    index: 0
  - letter: B
    index: 1
subnet_groups:
  - name: Private
    role: private
    members:
      - cidr_block: 172.16.0.0/26
        az_letter: a
      - cidr_block: 172.16.0.64/26
        az_letter: b
  - name: Data
    role: isolated
    members:
      - cidr_block: 172.16.0.128/26
        az_letter: a
endpoints:
  object_storage: true
hosted_zone_name: internal.example.com
";
        let parser = SpecParser::new();
        let spec = parser.parse_yaml(yaml, None).unwrap();

        assert_eq!(spec.subnet_groups.len(), 2);
        assert_eq!(spec.subnet_groups[0].name, "Private");
        assert_eq!(spec.subnet_groups[1].role, SubnetRole::Isolated);
        assert_eq!(spec.member_count(), 3);
        assert!(spec.endpoints.object_storage);
        assert_eq!(spec.hosted_zone_name.as_deref(), Some("internal.example.com"));
    }

    #[test]
    fn test_parse_invalid_yaml_fails() {
        let parser = SpecParser::new();
        assert!(parser.parse_yaml("cidr_block: [unclosed", None).is_err());
    }

    #[test]
    fn test_load_dir_merges_fragments_in_order() {
        let dir = tempfile::tempdir().unwrap();

        std::fs::write(
            dir.path().join("00-network.yaml"),
            "cidr_block: 10.0.0.0/16\navailability_zones:\n  - letter: A\n    index: 0\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("10-subnets.yaml"),
            "subnet_groups:\n  - name: App\n    role: private\n    members:\n      - cidr_block: 10.0.1.0/24\n        az_letter: a\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let spec = SpecParser::new().load_dir(dir.path()).unwrap();
        assert_eq!(spec.cidr_block, "10.0.0.0/16");
        assert_eq!(spec.subnet_groups.len(), 1);
        assert_eq!(spec.subnet_groups[0].name, "App");
    }

    #[test]
    fn test_load_dir_later_fragment_wins() {
        let dir = tempfile::tempdir().unwrap();

        std::fs::write(
            dir.path().join("00-base.yaml"),
            "cidr_block: 10.0.0.0/16\navailability_zones:\n  - letter: A\n    index: 0\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("99-override.yaml"), "cidr_block: 172.16.0.0/24\n")
            .unwrap();

        let spec = SpecParser::new().load_dir(dir.path()).unwrap();
        assert_eq!(spec.cidr_block, "172.16.0.0/24");
    }

    #[test]
    fn test_load_dir_empty_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = SpecParser::new().load_dir(dir.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = SpecParser::new().load_file("/nonexistent/network.yaml");
        assert!(result.is_err());
    }
}

//! Integration tests for error types

#[cfg(test)]
mod tests {
    use rpmkit_errors::*;

    #[test]
    fn test_error_conversion() {
        let err: Error = RepositoryError::NotFound {
            path: "/src/yum-labs".into(),
        }
        .into();
        assert!(matches!(err, Error::Repository(_)));
    }

    #[test]
    fn test_error_display() {
        let err = BuildError::ComposeFailed {
            profile: "centos7".into(),
            code: Some(2),
        };
        assert_eq!(
            err.to_string(),
            "containerized build for profile centos7 failed with exit code 2"
        );

        let err = RepositoryError::StepFailed {
            step: "push".into(),
            code: None,
        };
        assert_eq!(
            err.to_string(),
            "repository step `push` failed (terminated by signal)"
        );
    }

    #[test]
    fn test_error_clone() {
        let err = BuildError::ArtifactMissing {
            path: "/dist/last_build.rpm".into(),
        };
        let cloned = err.clone();
        assert_eq!(err.to_string(), cloned.to_string());
    }

    #[test]
    fn test_io_errors_map_by_kind() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let storage = StorageError::from_io_with_path(&io, std::path::Path::new("/src/yum-labs"));
        assert!(matches!(storage, StorageError::PermissionDenied { .. }));

        let err: Error = io.into();
        assert!(matches!(
            err,
            Error::Io {
                kind: std::io::ErrorKind::PermissionDenied,
                ..
            }
        ));
        assert_eq!(err.exit_code(), EXIT_FAILURE);
    }

    #[test]
    fn test_toml_error_becomes_config_error() {
        let parse: std::result::Result<toml::Table, _> = toml::from_str("[paths\n");
        let err: Error = parse.unwrap_err().into();
        assert!(matches!(err, Error::Config(ConfigError::ParseError { .. })));
        assert_eq!(err.user_code(), Some("config.parse_error"));
    }

    #[test]
    fn test_target_errors_carry_hints() {
        let err: Error = TargetError::Unknown {
            name: "install".into(),
        }
        .into();
        assert_eq!(err.exit_code(), EXIT_FAILURE);
        assert!(err.user_hint().is_some());
    }
}

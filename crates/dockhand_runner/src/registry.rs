//! Image reference qualification.
//!
//! Bare image names (`mongo`, `bitnami/redis`) are assumed to live on the
//! default public registry. Anything that looks like it carries a registry
//! host is left alone. The check is a plain substring match against a short
//! list of domain suffixes, so a name like `my.iodine` is also treated as
//! qualified.

/// Substrings that mark an image reference as already carrying a registry host.
pub const REGISTRY_EXTENSION_OPTIONS: [&str; 4] = [".com", ".io", ".org", ".net"];

/// Prefix applied to bare image names.
pub const DEFAULT_REGISTRY_PREFIX: &str = "docker.io/library";

/// Returns true if any of `substrs` occurs in `s`.
pub fn substring_contained_in_slice(s: &str, substrs: &[&str]) -> bool {
    substrs.iter().any(|sub| s.contains(sub))
}

/// Qualify a bare image name with [`DEFAULT_REGISTRY_PREFIX`].
pub fn qualify_image(image: &str) -> String {
    if substring_contained_in_slice(image, &REGISTRY_EXTENSION_OPTIONS) {
        image.to_string()
    } else {
        format!("{}/{}", DEFAULT_REGISTRY_PREFIX, image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substring_contained_in_slice() {
        let cases = [
            ("no docker hub", "mongo", false),
            ("docker hub", "docker.io/library/mongo", true),
            ("custom registry", "registry.example.com/team/api", true),
            ("empty", "", false),
        ];

        for (name, input, expected) in cases {
            assert_eq!(
                substring_contained_in_slice(input, &REGISTRY_EXTENSION_OPTIONS),
                expected,
                "case: {}",
                name
            );
        }
    }

    #[test]
    fn test_empty_substring_list_never_matches() {
        assert!(!substring_contained_in_slice("docker.io/library/mongo", &[]));
    }

    #[test]
    fn test_qualify_bare_names() {
        assert_eq!(qualify_image("mongo"), "docker.io/library/mongo");
        assert_eq!(qualify_image("redis:7"), "docker.io/library/redis:7");
        assert_eq!(qualify_image("bitnami/redis"), "docker.io/library/bitnami/redis");
    }

    #[test]
    fn test_qualified_names_pass_through() {
        for image in [
            "docker.io/library/mongo",
            "ghcr.io/owner/app:1.2",
            "quay.org/x",
            "mirror.example.net/postgres",
        ] {
            assert_eq!(qualify_image(image), image);
        }
    }

    #[test]
    fn test_substring_match_misfires_on_lookalike_names() {
        // Not a registry host, but contains ".io".
        assert_eq!(qualify_image("my.iodine"), "my.iodine");
    }
}

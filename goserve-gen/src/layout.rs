//! Relative locations shared by more than one generated file
//!
//! The key pair generator writes to these paths and the environment files and
//! compose file point at them. Keeping them in one value means the two sides
//! cannot drift apart.

/// Directory holding the key pair
const KEYS_DIR: &str = "keys";
/// PKCS#1 private key file name
const PRIVATE_KEY_FILE: &str = "private.pem";
/// SPKI public key file name
const PUBLIC_KEY_FILE: &str = "public.pem";
/// Directory holding the seed script
const SEED_DIR: &str = ".extra/setup";
/// Seed script file name
const SEED_FILE: &str = "init-db.js";
/// Environment file read by the server
const ENV_FILE: &str = ".env";
/// Environment file read by the test server
const TEST_ENV_FILE: &str = ".test.env";

/// Relative project layout
///
/// Paths are always relative to the project root and use `/` separators,
/// because they end up inside generated text as well as on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    keys_dir: String,
    private_key_file: String,
    public_key_file: String,
    seed_dir: String,
    seed_file: String,
}

impl Default for ProjectLayout {
    fn default() -> Self {
        Self {
            keys_dir: KEYS_DIR.to_string(),
            private_key_file: PRIVATE_KEY_FILE.to_string(),
            public_key_file: PUBLIC_KEY_FILE.to_string(),
            seed_dir: SEED_DIR.to_string(),
            seed_file: SEED_FILE.to_string(),
        }
    }
}

impl ProjectLayout {
    /// Directory holding the key pair
    #[must_use]
    pub fn keys_dir(&self) -> &str {
        &self.keys_dir
    }

    /// Private key path, e.g. `keys/private.pem`
    #[must_use]
    pub fn private_key_path(&self) -> String {
        format!("{}/{}", self.keys_dir, self.private_key_file)
    }

    /// Public key path, e.g. `keys/public.pem`
    #[must_use]
    pub fn public_key_path(&self) -> String {
        format!("{}/{}", self.keys_dir, self.public_key_file)
    }

    /// Seed script file name
    #[must_use]
    pub fn seed_file(&self) -> &str {
        &self.seed_file
    }

    /// Seed script path, e.g. `.extra/setup/init-db.js`
    #[must_use]
    pub fn seed_script_path(&self) -> String {
        format!("{}/{}", self.seed_dir, self.seed_file)
    }

    /// Environment file read by the server
    #[must_use]
    pub const fn env_file(&self) -> &'static str {
        ENV_FILE
    }

    /// Environment file read by the test server
    #[must_use]
    pub const fn test_env_file(&self) -> &'static str {
        TEST_ENV_FILE
    }

    /// Path seen from a directory one level below the project root
    ///
    /// The generated test server runs from inside a package directory, so
    /// `.test.env` refers to the keys through `../`.
    #[must_use]
    pub fn from_subdirectory(path: &str) -> String {
        format!("../{path}")
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let layout = ProjectLayout::default();
        assert_eq!(layout.keys_dir(), "keys");
        assert_eq!(layout.private_key_path(), "keys/private.pem");
        assert_eq!(layout.public_key_path(), "keys/public.pem");
        assert_eq!(layout.seed_script_path(), ".extra/setup/init-db.js");
        assert_eq!(layout.env_file(), ".env");
        assert_eq!(layout.test_env_file(), ".test.env");
    }

    #[test]
    fn test_from_subdirectory() {
        assert_eq!(
            ProjectLayout::from_subdirectory("keys/private.pem"),
            "../keys/private.pem"
        );
    }
}

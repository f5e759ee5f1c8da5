//! Default configuration values

/// Project config file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "protowrap.toml";

/// Environment variable naming an explicit config file
pub const ENV_CONFIG_FILE: &str = "PROTOWRAP_CONFIG";

/// Default schema compiler executable
pub const DEFAULT_PROTOC: &str = "protoc";

/// Default language compiler executable
pub const DEFAULT_JAVAC: &str = "javac";

/// Default archiver executable
pub const DEFAULT_JAR: &str = "jar";

/// Java package injected into every staged schema
pub const DEFAULT_JAVA_PACKAGE: &str = "com.baidu.entity.pb";

/// Source encoding passed to the language compiler
pub const DEFAULT_SOURCE_ENCODING: &str = "UTF-8";

/// Language level passed as both `-source` and `-target`
pub const DEFAULT_JAVA_TARGET: &str = "1.6";

/// Output root, relative to the working directory
pub const DEFAULT_OUTPUT_ROOT: &str = "out";

/// Suffix of schema sources picked up by staging
pub const SCHEMA_SOURCE_SUFFIX: &str = ".proto.1";

/// Suffix of staged schema files
pub const SCHEMA_STAGED_SUFFIX: &str = ".proto";

/// Suffix of generated sources handed to the language compiler
pub const GENERATED_SOURCE_SUFFIX: &str = ".java";

/// Staged schema subdirectory
pub const STAGED_SCHEMA_DIR_NAME: &str = "proto";

/// Generated source subdirectory
pub const GENERATED_SOURCE_DIR_NAME: &str = "src";

/// Compiled class subdirectory
pub const COMPILED_OUTPUT_DIR_NAME: &str = "classes";

/// Final archive file name
pub const ARCHIVE_FILE_NAME: &str = "classes.jar";

//! Build variants
//!
//! The four flavors share the whole pipeline; everything that differs
//! between them lives in [`VariantConfig`].

use std::fmt;

/// Build flavor selected by the first positional argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    /// Full Java runtime
    #[default]
    Full,
    /// Full generator with `optimize_for=LITE_RUNTIME` injected
    Lite,
    /// Java micro generator
    Micro,
    /// Java nano generator
    Nano,
}

/// Per-variant settings consumed by the shared pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantConfig {
    /// Schema compiler flag that selects the generator, without leading dashes
    pub output_flag_name: &'static str,
    /// Directory under the output root holding this variant's artifacts
    pub base_dir_name: &'static str,
    /// Whether staged schemas get the lite runtime option
    pub injects_lite_option: bool,
    /// Whether generator plugin arguments may be passed
    pub accepts_generator_args: bool,
}

impl Variant {
    /// Every variant, in CLI documentation order
    pub const ALL: [Variant; 4] = [Self::Full, Self::Lite, Self::Micro, Self::Nano];

    /// Select a variant from the first positional argument
    ///
    /// Returns `None` for words that do not name a variant; callers fall
    /// back to [`Variant::Full`].
    pub fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "full" => Some(Self::Full),
            "lite" => Some(Self::Lite),
            "micro" => Some(Self::Micro),
            "nano" => Some(Self::Nano),
            _ => None,
        }
    }

    /// Short lowercase name
    pub fn name(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Lite => "lite",
            Self::Micro => "micro",
            Self::Nano => "nano",
        }
    }

    /// Configuration record for this variant
    pub fn config(self) -> VariantConfig {
        match self {
            Self::Full => VariantConfig {
                output_flag_name: "java_out",
                base_dir_name: "java",
                injects_lite_option: false,
                accepts_generator_args: false,
            },
            Self::Lite => VariantConfig {
                output_flag_name: "java_out",
                base_dir_name: "javalite",
                injects_lite_option: true,
                accepts_generator_args: false,
            },
            Self::Micro => VariantConfig {
                output_flag_name: "javamicro_out",
                base_dir_name: "javamicro",
                injects_lite_option: false,
                accepts_generator_args: true,
            },
            Self::Nano => VariantConfig {
                output_flag_name: "javanano_out",
                base_dir_name: "javanano",
                injects_lite_option: false,
                accepts_generator_args: true,
            },
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

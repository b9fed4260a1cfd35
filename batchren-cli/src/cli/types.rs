use batchren_core::{AgeFilter, CaseMode, ExtensionPreset, Preview, SizeFilter};
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum PreviewArg {
    Table,
    Summary,
    Json,
    None,
}

impl From<PreviewArg> for Preview {
    fn from(arg: PreviewArg) -> Self {
        match arg {
            PreviewArg::Table => Self::Table,
            PreviewArg::Summary => Self::Summary,
            PreviewArg::Json => Self::Json,
            PreviewArg::None => Self::None,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Json,
}

impl From<OutputFormat> for batchren_core::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Summary => Self::Summary,
            OutputFormat::Json => Self::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum PresetArg {
    Images,
    Documents,
    Audio,
    Video,
    Archives,
    Executables,
}

impl From<PresetArg> for ExtensionPreset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Images => Self::Images,
            PresetArg::Documents => Self::Documents,
            PresetArg::Audio => Self::Audio,
            PresetArg::Video => Self::Video,
            PresetArg::Archives => Self::Archives,
            PresetArg::Executables => Self::Executables,
        }
    }
}

/// Size buckets of the file list filter
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum SizeArg {
    /// Under 1 MB
    Small,
    /// 1 MB to 10 MB
    Medium,
    /// 10 MB to 100 MB
    Large,
    /// Over 100 MB
    Huge,
}

impl From<SizeArg> for SizeFilter {
    fn from(arg: SizeArg) -> Self {
        match arg {
            SizeArg::Small => Self::Under1M,
            SizeArg::Medium => Self::From1MTo10M,
            SizeArg::Large => Self::From10MTo100M,
            SizeArg::Huge => Self::Over100M,
        }
    }
}

/// Modification age windows of the file list filter
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum AgeArg {
    Today,
    Week,
    Month,
    Year,
}

impl From<AgeArg> for AgeFilter {
    fn from(arg: AgeArg) -> Self {
        match arg {
            AgeArg::Today => Self::Today,
            AgeArg::Week => Self::LastWeek,
            AgeArg::Month => Self::LastMonth,
            AgeArg::Year => Self::LastYear,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum CaseArg {
    Upper,
    Lower,
    Title,
    Sentence,
}

impl From<CaseArg> for CaseMode {
    fn from(arg: CaseArg) -> Self {
        match arg {
            CaseArg::Upper => Self::Upper,
            CaseArg::Lower => Self::Lower,
            CaseArg::Title => Self::Title,
            CaseArg::Sentence => Self::Sentence,
        }
    }
}

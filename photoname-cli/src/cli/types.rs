use clap::ValueEnum;
use photoname_core::Preview;

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum PreviewArg {
    Table,
    Summary,
    None,
}

impl From<PreviewArg> for Preview {
    fn from(arg: PreviewArg) -> Self {
        match arg {
            PreviewArg::Table => Self::Table,
            PreviewArg::Summary => Self::Summary,
            PreviewArg::None => Self::None,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Json,
}

impl From<OutputFormat> for photoname_core::OutputFormat {
    fn from(arg: OutputFormat) -> Self {
        match arg {
            OutputFormat::Summary => Self::Summary,
            OutputFormat::Json => Self::Json,
        }
    }
}

impl From<photoname_core::OutputFormat> for OutputFormat {
    fn from(format: photoname_core::OutputFormat) -> Self {
        match format {
            photoname_core::OutputFormat::Summary => Self::Summary,
            photoname_core::OutputFormat::Json => Self::Json,
        }
    }
}

/// Detail tier controlling which columns a payload detail query selects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// Status, date and message only.
    #[default]
    Minimal,
    /// Adds service names and the owning account.
    Standard,
    /// Every payload and event column.
    Full,
}

/// Column that a payload detail query can project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectedColumn {
    /// Payload storage identifier.
    PayloadId,
    /// Payload request identifier.
    RequestId,
    /// Owning account.
    Account,
    /// Client system identifier.
    SystemId,
    /// Inventory host identifier.
    InventoryId,
    /// Event status message.
    StatusMessage,
    /// Event time.
    Date,
    /// Event row creation time.
    CreatedAt,
    /// Service name.
    Service,
    /// Source name.
    Source,
    /// Status name.
    Status,
}

const MINIMAL_COLUMNS: &[ProjectedColumn] = &[
    ProjectedColumn::Status,
    ProjectedColumn::Date,
    ProjectedColumn::StatusMessage,
];

const STANDARD_COLUMNS: &[ProjectedColumn] = &[
    ProjectedColumn::Service,
    ProjectedColumn::Status,
    ProjectedColumn::Account,
    ProjectedColumn::Date,
    ProjectedColumn::StatusMessage,
];

const FULL_COLUMNS: &[ProjectedColumn] = &[
    ProjectedColumn::PayloadId,
    ProjectedColumn::RequestId,
    ProjectedColumn::Account,
    ProjectedColumn::SystemId,
    ProjectedColumn::InventoryId,
    ProjectedColumn::StatusMessage,
    ProjectedColumn::Date,
    ProjectedColumn::CreatedAt,
    ProjectedColumn::Service,
    ProjectedColumn::Source,
    ProjectedColumn::Status,
];

impl Verbosity {
    /// Parses a transport value, falling back to [`Verbosity::Minimal`] for
    /// anything other than `"1"` or `"2"`.
    #[must_use]
    pub fn from_transport(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("1") => Self::Standard,
            Some("2") => Self::Full,
            _ => Self::Minimal,
        }
    }

    /// Returns the numeric level.
    #[must_use]
    pub fn level(&self) -> u8 {
        match self {
            Self::Minimal => 0,
            Self::Standard => 1,
            Self::Full => 2,
        }
    }

    /// Returns the ordered columns selected at this level.
    #[must_use]
    pub fn projected_columns(&self) -> &'static [ProjectedColumn] {
        match self {
            Self::Minimal => MINIMAL_COLUMNS,
            Self::Standard => STANDARD_COLUMNS,
            Self::Full => FULL_COLUMNS,
        }
    }
}

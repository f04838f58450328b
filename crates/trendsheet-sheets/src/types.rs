//! Sheet service response types.

use serde::Deserialize;

/// Spreadsheet metadata as returned by the service.
#[derive(Debug, Deserialize)]
pub(crate) struct SpreadsheetResponse {
    pub properties: SpreadsheetProperties,
    #[serde(default)]
    pub sheets: Vec<Sheet>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SpreadsheetProperties {
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Sheet {
    pub properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SheetProperties {
    pub title: String,
    #[serde(default)]
    pub grid_properties: GridProperties,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GridProperties {
    #[serde(default)]
    pub row_count: u64,
    #[serde(default)]
    pub column_count: u64,
}

/// Error envelope the service wraps failures in.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: String,
}

/// Public view of the spreadsheet used by callers: the display title plus
/// the worksheets it currently holds.
#[derive(Debug, Clone)]
pub struct SpreadsheetInfo {
    pub title: String,
    pub worksheets: Vec<WorksheetProps>,
}

/// One worksheet and its grid capacity.
#[derive(Debug, Clone)]
pub struct WorksheetProps {
    pub title: String,
    pub row_count: u64,
    pub column_count: u64,
}

impl From<SpreadsheetResponse> for SpreadsheetInfo {
    fn from(response: SpreadsheetResponse) -> Self {
        Self {
            title: response.properties.title,
            worksheets: response
                .sheets
                .into_iter()
                .map(|s| WorksheetProps {
                    title: s.properties.title,
                    row_count: s.properties.grid_properties.row_count,
                    column_count: s.properties.grid_properties.column_count,
                })
                .collect(),
        }
    }
}

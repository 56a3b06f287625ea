use serde::{Deserialize, Serialize};

use crate::depreciation::TargetPeriod;
use crate::error::DepreError;
use crate::extract::AssetRecord;
use crate::DepreResult;

/// The stages of one export session, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    AwaitingFile,
    AwaitingMasterSheet,
    ReviewingRecords,
    ConfiguringTargetDate,
    ReadyToExport,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::AwaitingFile => "AwaitingFile",
            SessionState::AwaitingMasterSheet => "AwaitingMasterSheet",
            SessionState::ReviewingRecords => "ReviewingRecords",
            SessionState::ConfiguringTargetDate => "ConfiguringTargetDate",
            SessionState::ReadyToExport => "ReadyToExport",
        }
    }
}

/// Legal forward transitions. Backward moves are handled separately and
/// only reach states the session has already visited.
const TRANSITIONS: [(SessionState, SessionState); 4] = [
    (SessionState::AwaitingFile, SessionState::AwaitingMasterSheet),
    (SessionState::AwaitingMasterSheet, SessionState::ReviewingRecords),
    (SessionState::ReviewingRecords, SessionState::ConfiguringTargetDate),
    (SessionState::ConfiguringTargetDate, SessionState::ReadyToExport),
];

/// One guided export run as an explicit state machine.
///
/// Each operation is legal in exactly one state; calling it elsewhere
/// returns `InvalidTransition` and leaves the session untouched. This
/// replaces the ambient step-gating the tool previously relied on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSession {
    state: SessionState,
    visited: Vec<SessionState>,
    file_name: Option<String>,
    sheet_names: Vec<String>,
    master_sheet: Option<String>,
    records: Vec<AssetRecord>,
    target: Option<TargetPeriod>,
    export_count: u32,
}

impl Default for ExportSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ExportSession {
    pub fn new() -> Self {
        Self {
            state: SessionState::AwaitingFile,
            visited: vec![SessionState::AwaitingFile],
            file_name: None,
            sheet_names: Vec::new(),
            master_sheet: None,
            records: Vec::new(),
            target: None,
            export_count: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn sheet_names(&self) -> &[String] {
        &self.sheet_names
    }

    pub fn master_sheet(&self) -> Option<&str> {
        self.master_sheet.as_deref()
    }

    pub fn records(&self) -> &[AssetRecord] {
        &self.records
    }

    pub fn target(&self) -> Option<&TargetPeriod> {
        self.target.as_ref()
    }

    /// How many workbooks this session has exported.
    pub fn export_count(&self) -> u32 {
        self.export_count
    }

    fn advance(&mut self, to: SessionState) -> DepreResult<()> {
        let legal = TRANSITIONS
            .iter()
            .any(|(from, next)| *from == self.state && *next == to);
        if !legal {
            return Err(DepreError::InvalidTransition {
                from: self.state.as_str().into(),
                to: to.as_str().into(),
            });
        }
        self.state = to;
        if !self.visited.contains(&to) {
            self.visited.push(to);
        }
        Ok(())
    }

    /// Register the selected file and its sheet names.
    pub fn load_file(
        &mut self,
        file_name: impl Into<String>,
        sheet_names: Vec<String>,
    ) -> DepreResult<()> {
        if sheet_names.is_empty() {
            return Err(DepreError::InvalidInput {
                field: "sheet_names".into(),
                reason: "Workbook contains no sheets".into(),
            });
        }
        self.advance(SessionState::AwaitingMasterSheet)?;
        self.file_name = Some(file_name.into());
        self.sheet_names = sheet_names;
        Ok(())
    }

    /// Choose the master sheet out of the loaded workbook.
    pub fn choose_master(&mut self, name: &str) -> DepreResult<()> {
        if !self.sheet_names.iter().any(|s| s == name) {
            return Err(DepreError::InvalidInput {
                field: "master_sheet".into(),
                reason: format!("'{name}' is not a sheet of the loaded workbook"),
            });
        }
        self.advance(SessionState::ReviewingRecords)?;
        self.master_sheet = Some(name.to_string());
        Ok(())
    }

    /// Accept the extracted records after review.
    pub fn review_records(&mut self, records: Vec<AssetRecord>) -> DepreResult<()> {
        if records.is_empty() {
            return Err(DepreError::MissingPrerequisite(
                "No asset records were extracted from the master sheet".into(),
            ));
        }
        self.advance(SessionState::ConfiguringTargetDate)?;
        self.records = records;
        Ok(())
    }

    /// Fix the target period, making the session exportable.
    pub fn set_target(&mut self, target: TargetPeriod) -> DepreResult<()> {
        self.advance(SessionState::ReadyToExport)?;
        self.target = Some(target);
        Ok(())
    }

    /// Record a completed export. Legal only in the ready stage; the session
    /// stays there, so the target can be changed and the workbook written
    /// again.
    pub fn mark_exported(&mut self) -> DepreResult<()> {
        if self.state != SessionState::ReadyToExport {
            return Err(DepreError::InvalidTransition {
                from: self.state.as_str().into(),
                to: SessionState::ReadyToExport.as_str().into(),
            });
        }
        self.export_count += 1;
        Ok(())
    }

    /// Step back to an earlier, already-visited stage. Downstream derived
    /// data stays in place; re-running the forward operations overwrites it.
    pub fn back_to(&mut self, state: SessionState) -> DepreResult<()> {
        if state == self.state || !self.visited.contains(&state) {
            return Err(DepreError::InvalidTransition {
                from: self.state.as_str().into(),
                to: state.as_str().into(),
            });
        }
        self.state = state;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CellRef;
    use rust_decimal_macros::dec;

    fn record() -> AssetRecord {
        AssetRecord {
            identifier: "A1".into(),
            address: "Main St".into(),
            cost: dec!(10000),
            purchase_date: "01-01-2020".into(),
            identifier_ref: CellRef::new("Hoja1", 1, 1),
            address_ref: CellRef::new("Hoja1", 2, 1),
            cost_ref: CellRef::new("Hoja1", 4, 1),
            date_ref: CellRef::new("Hoja1", 5, 1),
        }
    }

    fn ready_session() -> ExportSession {
        let mut s = ExportSession::new();
        s.load_file("activos.xlsx", vec!["Hoja1".into(), "Otra".into()])
            .unwrap();
        s.choose_master("Hoja1").unwrap();
        s.review_records(vec![record()]).unwrap();
        s.set_target(TargetPeriod::new(1, 2021).unwrap()).unwrap();
        s
    }

    #[test]
    fn test_happy_path_reaches_ready() {
        let s = ready_session();
        assert_eq!(s.state(), SessionState::ReadyToExport);
        assert_eq!(s.master_sheet(), Some("Hoja1"));
        assert_eq!(s.records().len(), 1);
        assert!(s.target().is_some());
    }

    #[test]
    fn test_operations_out_of_order_are_rejected() {
        let mut s = ExportSession::new();

        // Everything but load_file is illegal in AwaitingFile.
        assert!(s.choose_master("Hoja1").is_err());
        assert!(s.review_records(vec![record()]).is_err());
        assert!(s.set_target(TargetPeriod::new(1, 2021).unwrap()).is_err());
        assert_eq!(s.state(), SessionState::AwaitingFile);
    }

    #[test]
    fn test_load_file_requires_sheets() {
        let mut s = ExportSession::new();
        assert!(s.load_file("x.xlsx", vec![]).is_err());
        assert_eq!(s.state(), SessionState::AwaitingFile);
    }

    #[test]
    fn test_choose_master_must_exist() {
        let mut s = ExportSession::new();
        s.load_file("x.xlsx", vec!["Hoja1".into()]).unwrap();
        assert!(s.choose_master("NoExiste").is_err());
        assert_eq!(s.state(), SessionState::AwaitingMasterSheet);
    }

    #[test]
    fn test_review_requires_records() {
        let mut s = ExportSession::new();
        s.load_file("x.xlsx", vec!["Hoja1".into()]).unwrap();
        s.choose_master("Hoja1").unwrap();
        assert!(s.review_records(vec![]).is_err());
        assert_eq!(s.state(), SessionState::ReviewingRecords);
    }

    #[test]
    fn test_mark_exported_requires_ready_state() {
        let mut s = ExportSession::new();
        assert!(s.mark_exported().is_err());
        assert_eq!(s.export_count(), 0);

        let mut s = ready_session();
        s.mark_exported().unwrap();
        s.mark_exported().unwrap();
        assert_eq!(s.export_count(), 2);
        assert_eq!(s.state(), SessionState::ReadyToExport);

        // Stepping back makes exporting illegal until the target is set again.
        s.back_to(SessionState::ConfiguringTargetDate).unwrap();
        assert!(s.mark_exported().is_err());
        s.set_target(TargetPeriod::new(2, 2021).unwrap()).unwrap();
        s.mark_exported().unwrap();
        assert_eq!(s.export_count(), 3);
    }

    #[test]
    fn test_back_to_visited_state_only() {
        let mut s = ready_session();

        s.back_to(SessionState::ConfiguringTargetDate).unwrap();
        assert_eq!(s.state(), SessionState::ConfiguringTargetDate);

        // Forward again after changing the target.
        s.set_target(TargetPeriod::new(6, 2022).unwrap()).unwrap();
        assert_eq!(s.state(), SessionState::ReadyToExport);
    }

    #[test]
    fn test_back_to_unvisited_or_current_is_rejected() {
        let mut s = ExportSession::new();
        s.load_file("x.xlsx", vec!["Hoja1".into()]).unwrap();

        assert!(s.back_to(SessionState::ReadyToExport).is_err());
        assert!(s.back_to(SessionState::AwaitingMasterSheet).is_err());
        assert_eq!(s.state(), SessionState::AwaitingMasterSheet);
    }
}

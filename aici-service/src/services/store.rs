//! In-memory ledger store with JSON snapshot persistence.
//!
//! Clients and invoices survive restarts through the snapshot file; the
//! simulation history is rebuilt from its seed rows on every start.

use std::fs;
use std::path::PathBuf;
use std::sync::{PoisonError, RwLock};

use chrono::{Local, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use service_core::AppError;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::models::{
    AdvanceCalculation, AiciStatus, Client, CreateClient, CreateInvoice, EntryStatus, Invoice,
    InvoiceStatus, RoundingPolicy, SimulationEntry, SubmitEntry,
};
use crate::utils::money::parse_amount;

/// The single user-facing validation message of the submission flow.
pub const INCOMPLETE_FORM_MESSAGE: &str = "Please complete the form";

/// Persisted portion of the store.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub clients: Vec<Client>,
    pub invoices: Vec<Invoice>,
}

#[derive(Default)]
struct State {
    clients: Vec<Client>,
    invoices: Vec<Invoice>,
    history: Vec<SimulationEntry>,
}

/// Owner of all mutable application state.
///
/// Handlers only read and mutate through its methods; the rendering layer
/// gets cloned views.
pub struct LedgerStore {
    state: RwLock<State>,
    snapshot_path: Option<PathBuf>,
}

impl LedgerStore {
    /// Build the store, loading the snapshot when one exists and seeding
    /// the simulation history.
    pub fn new(snapshot_path: Option<PathBuf>) -> Result<Self, AppError> {
        let mut state = State::default();

        if let Some(path) = &snapshot_path {
            if path.exists() {
                let raw = fs::read_to_string(path)?;
                let snapshot: Snapshot = serde_json::from_str(&raw)
                    .map_err(|e| AppError::Internal(anyhow::anyhow!("Corrupt snapshot: {}", e)))?;
                info!(
                    clients = snapshot.clients.len(),
                    invoices = snapshot.invoices.len(),
                    path = %path.display(),
                    "Snapshot loaded"
                );
                state.clients = snapshot.clients;
                state.invoices = snapshot.invoices;
            }
        }

        seed_history(&mut state.history);

        Ok(Self {
            state: RwLock::new(state),
            snapshot_path,
        })
    }

    fn persist(&self, state: &State) -> Result<(), AppError> {
        if let Some(path) = &self.snapshot_path {
            let snapshot = Snapshot {
                clients: state.clients.clone(),
                invoices: state.invoices.clone(),
            };
            let raw = serde_json::to_string_pretty(&snapshot)
                .map_err(|e| AppError::Internal(anyhow::anyhow!("Snapshot encode: {}", e)))?;
            fs::write(path, raw)?;
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Simulation ledger
    // -------------------------------------------------------------------------

    /// Validate and record a simulation entry at the top of the history.
    ///
    /// Client name and service label must be non-empty after trimming and the
    /// amount must parse to a strictly positive number; any violation maps to
    /// the single blocking form message. An empty date defaults to today,
    /// other date text is kept verbatim.
    #[instrument(skip(self, input))]
    pub fn submit_entry(
        &self,
        input: &SubmitEntry,
        policy: RoundingPolicy,
    ) -> Result<SimulationEntry, AppError> {
        let client_name = input.client_name.trim();
        let service_label = input.service_label.trim();
        if client_name.is_empty() || service_label.is_empty() {
            return Err(AppError::Validation(INCOMPLETE_FORM_MESSAGE.to_string()));
        }

        let gross = parse_amount(&input.amount)
            .filter(|g| *g > Decimal::ZERO)
            .ok_or_else(|| AppError::Validation(INCOMPLETE_FORM_MESSAGE.to_string()))?;

        let date = match input.date.trim() {
            "" => Local::now().date_naive().format("%Y-%m-%d").to_string(),
            text => text.to_string(),
        };

        let calc = AdvanceCalculation::compute(gross, policy);
        let entry = SimulationEntry {
            date,
            client_name: client_name.to_string(),
            service_label: service_label.to_string(),
            gross: calc.gross,
            advance: calc.advance,
            status: EntryStatus::Submitted,
        };

        let mut state = self.write();
        state.history.insert(0, entry.clone());

        info!(client = %entry.client_name, gross = %entry.gross, "Simulation entry recorded");
        Ok(entry)
    }

    /// Current history, most recent submission first, seed rows last.
    pub fn history(&self) -> Vec<SimulationEntry> {
        self.read().history.clone()
    }

    // -------------------------------------------------------------------------
    // Clients
    // -------------------------------------------------------------------------

    #[instrument(skip(self, input))]
    pub fn create_client(&self, input: CreateClient) -> Result<Client, AppError> {
        let client = Client {
            client_id: Uuid::new_v4(),
            last_name: input.last_name,
            first_name: input.first_name,
            email: input.email,
            address: input.address,
            aici_status: AiciStatus::NotEnrolled,
            created_utc: Utc::now(),
        };

        let mut state = self.write();
        state.clients.push(client.clone());
        self.persist(&state)?;

        info!(client_id = %client.client_id, "Client created");
        Ok(client)
    }

    pub fn list_clients(&self) -> Vec<Client> {
        self.read().clients.clone()
    }

    pub fn get_client(&self, client_id: Uuid) -> Option<Client> {
        self.read()
            .clients
            .iter()
            .find(|c| c.client_id == client_id)
            .cloned()
    }

    /// Advance the client's AICI enrolment by one step.
    #[instrument(skip(self))]
    pub fn enrol_client(&self, client_id: Uuid) -> Result<Client, AppError> {
        let mut state = self.write();
        let client = state
            .clients
            .iter_mut()
            .find(|c| c.client_id == client_id)
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Client not found")))?;

        client.aici_status = client.aici_status.advanced();
        let updated = client.clone();
        self.persist(&state)?;

        info!(client_id = %client_id, status = %updated.aici_status, "Client enrolment advanced");
        Ok(updated)
    }

    // -------------------------------------------------------------------------
    // Invoices
    // -------------------------------------------------------------------------

    /// Create a draft invoice; the total is the rounded sum of its lines and
    /// the full amount stays payable until AICI is applied.
    #[instrument(skip(self, input), fields(client_id = %input.client_id))]
    pub fn create_invoice(&self, input: CreateInvoice) -> Result<Invoice, AppError> {
        if input.lines.is_empty() {
            return Err(AppError::Validation(
                "An invoice requires at least one service line".to_string(),
            ));
        }

        let mut state = self.write();
        if !state.clients.iter().any(|c| c.client_id == input.client_id) {
            return Err(AppError::NotFound(anyhow::anyhow!("Client not found")));
        }

        let total: Decimal = input.lines.iter().map(|l| l.line_total()).sum();
        let total = RoundingPolicy::HalfUp2.apply(total);

        let invoice = Invoice {
            invoice_id: Uuid::new_v4(),
            client_id: input.client_id,
            lines: input.lines,
            total,
            advance: Decimal::ZERO,
            remainder: total,
            status: InvoiceStatus::Draft,
            urssaf_ref: None,
            message: None,
            created_utc: Utc::now(),
        };

        state.invoices.push(invoice.clone());
        self.persist(&state)?;

        info!(invoice_id = %invoice.invoice_id, total = %invoice.total, "Invoice created");
        Ok(invoice)
    }

    pub fn list_invoices(&self) -> Vec<Invoice> {
        self.read().invoices.clone()
    }

    pub fn get_invoice(&self, invoice_id: Uuid) -> Result<Invoice, AppError> {
        self.read()
            .invoices
            .iter()
            .find(|i| i.invoice_id == invoice_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Invoice not found")))
    }

    /// Apply the simulated immediate advance to an invoice.
    ///
    /// Requires the invoice's client to be actively enrolled in AICI.
    #[instrument(skip(self))]
    pub fn send_invoice_aici(
        &self,
        invoice_id: Uuid,
        policy: RoundingPolicy,
    ) -> Result<Invoice, AppError> {
        let mut state = self.write();

        let client_status = state
            .invoices
            .iter()
            .find(|i| i.invoice_id == invoice_id)
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Invoice not found")))
            .and_then(|invoice| {
                state
                    .clients
                    .iter()
                    .find(|c| c.client_id == invoice.client_id)
                    .map(|c| c.aici_status)
                    .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Client not found")))
            })?;

        if client_status != AiciStatus::Active {
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "Client is not enrolled in AICI (active status required)"
            )));
        }

        let invoice = state
            .invoices
            .iter_mut()
            .find(|i| i.invoice_id == invoice_id)
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Invoice not found")))?;

        let calc = AdvanceCalculation::compute(invoice.total, policy);
        invoice.advance = calc.advance;
        invoice.remainder = calc.remainder;
        invoice.status = InvoiceStatus::Accepted;
        invoice.urssaf_ref = Some(format!("URSSAF-{}", invoice.short_ref()));
        invoice.message = Some("Simulation: immediate advance applied (-50%).".to_string());
        let updated = invoice.clone();
        self.persist(&state)?;

        info!(invoice_id = %invoice_id, advance = %updated.advance, "AICI advance applied");
        Ok(updated)
    }

    // -------------------------------------------------------------------------
    // Snapshot
    // -------------------------------------------------------------------------

    pub fn export_snapshot(&self) -> Snapshot {
        let state = self.read();
        Snapshot {
            clients: state.clients.clone(),
            invoices: state.invoices.clone(),
        }
    }

    /// Replace clients and invoices with the uploaded snapshot and persist.
    /// The simulation history is untouched.
    #[instrument(skip(self, snapshot))]
    pub fn restore(&self, snapshot: Snapshot) -> Result<(usize, usize), AppError> {
        let mut state = self.write();
        state.clients = snapshot.clients;
        state.invoices = snapshot.invoices;
        self.persist(&state)?;

        let counts = (state.clients.len(), state.invoices.len());
        info!(clients = counts.0, invoices = counts.1, "Snapshot restored");
        Ok(counts)
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, State> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, State> {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Append the two fixed demonstration rows.
///
/// Seeds use the exact policy, so their advances are the unrounded products;
/// for 80 and 120 this coincides with the rounded values.
fn seed_history(history: &mut Vec<SimulationEntry>) {
    for (date, client_name, service_label, gross) in [
        ("2025-09-12", "Mme Dupont", "Jardinage", Decimal::from(80)),
        ("2025-09-05", "M. Martin", "Petit bricolage", Decimal::from(120)),
    ] {
        let calc = AdvanceCalculation::compute(gross, RoundingPolicy::Exact);
        history.push(SimulationEntry {
            date: date.to_string(),
            client_name: client_name.to_string(),
            service_label: service_label.to_string(),
            gross: calc.gross,
            advance: calc.advance,
            status: EntryStatus::Settled,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SapCategory, ServiceLine};
    use std::str::FromStr;

    fn store() -> LedgerStore {
        LedgerStore::new(None).unwrap()
    }

    fn submit(client: &str, service: &str, date: &str, amount: &str) -> SubmitEntry {
        SubmitEntry {
            client_name: client.to_string(),
            service_label: service.to_string(),
            date: date.to_string(),
            amount: amount.to_string(),
        }
    }

    fn line(label: &str, quantity: i64, unit_price: i64) -> ServiceLine {
        ServiceLine {
            label: label.to_string(),
            sap_category: SapCategory::Gardening,
            quantity: Decimal::from(quantity),
            unit_price: Decimal::from(unit_price),
        }
    }

    #[test]
    fn history_starts_with_exactly_two_seed_rows() {
        let store = store();
        let history = store.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].gross, Decimal::from(80));
        assert_eq!(history[0].advance, Decimal::from(40));
        assert_eq!(history[1].gross, Decimal::from(120));
        assert_eq!(history[1].advance, Decimal::from(60));
        assert!(history.iter().all(|e| e.status == EntryStatus::Settled));
    }

    #[test]
    fn submitted_entries_are_prepended_above_seeds() {
        let store = store();
        store
            .submit_entry(
                &submit("Mme Dupont", "Jardinage", "2025-10-12", "80"),
                RoundingPolicy::HalfUp2,
            )
            .unwrap();
        store
            .submit_entry(
                &submit("M. Petit", "Ménage", "2025-10-13", "50"),
                RoundingPolicy::HalfUp2,
            )
            .unwrap();

        let history = store.history();
        assert_eq!(history.len(), 4);
        assert_eq!(history[0].client_name, "M. Petit");
        assert_eq!(history[1].client_name, "Mme Dupont");
        assert_eq!(history[1].date, "2025-10-12");
        assert_eq!(history[1].advance, Decimal::from(40));
        assert_eq!(history[1].status, EntryStatus::Submitted);
        assert_eq!(history[2].status, EntryStatus::Settled);
    }

    #[test]
    fn submit_rejects_blank_fields_and_bad_amounts() {
        let store = store();
        for input in [
            submit("", "Jardinage", "", "80"),
            submit("   ", "Jardinage", "", "80"),
            submit("Mme Dupont", "", "", "80"),
            submit("Mme Dupont", "Jardinage", "", "0"),
            submit("Mme Dupont", "Jardinage", "", "-5"),
            submit("Mme Dupont", "Jardinage", "", "abc"),
        ] {
            let err = store
                .submit_entry(&input, RoundingPolicy::HalfUp2)
                .unwrap_err();
            assert!(matches!(err, AppError::Validation(ref m) if m == INCOMPLETE_FORM_MESSAGE));
        }
        assert_eq!(store.history().len(), 2, "rejected input must not append");
    }

    #[test]
    fn submit_defaults_empty_date_and_keeps_text_verbatim() {
        let store = store();
        let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
        let entry = store
            .submit_entry(
                &submit("Mme Dupont", "Jardinage", "", "80"),
                RoundingPolicy::HalfUp2,
            )
            .unwrap();
        assert_eq!(entry.date, today);

        let entry = store
            .submit_entry(
                &submit("Mme Dupont", "Jardinage", "someday soon", "80"),
                RoundingPolicy::HalfUp2,
            )
            .unwrap();
        assert_eq!(entry.date, "someday soon");
    }

    #[test]
    fn enrolment_walks_the_status_ladder() {
        let store = store();
        let client = store
            .create_client(CreateClient {
                last_name: "Dupont".to_string(),
                first_name: "Marie".to_string(),
                email: "marie.dupont@test.com".to_string(),
                address: "15 rue des Fleurs, Rennes".to_string(),
            })
            .unwrap();
        assert_eq!(client.aici_status, AiciStatus::NotEnrolled);

        let client = store.enrol_client(client.client_id).unwrap();
        assert_eq!(client.aici_status, AiciStatus::Pending);
        let client = store.enrol_client(client.client_id).unwrap();
        assert_eq!(client.aici_status, AiciStatus::Active);
        let client = store.enrol_client(client.client_id).unwrap();
        assert_eq!(client.aici_status, AiciStatus::Active);

        assert!(matches!(
            store.enrol_client(Uuid::new_v4()),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn invoice_totals_and_aici_application() {
        let store = store();
        let client = store
            .create_client(CreateClient {
                last_name: "Martin".to_string(),
                first_name: "Paul".to_string(),
                email: "paul.martin@test.com".to_string(),
                address: "Rennes".to_string(),
            })
            .unwrap();

        let invoice = store
            .create_invoice(CreateInvoice {
                client_id: client.client_id,
                lines: vec![line("Taille de haie", 1, 200), line("Tonte", 2, 35)],
            })
            .unwrap();
        assert_eq!(invoice.total, Decimal::from(270));
        assert_eq!(invoice.advance, Decimal::ZERO);
        assert_eq!(invoice.remainder, Decimal::from(270));
        assert_eq!(invoice.status, InvoiceStatus::Draft);

        // Client not active yet
        assert!(matches!(
            store.send_invoice_aici(invoice.invoice_id, RoundingPolicy::HalfUp2),
            Err(AppError::BadRequest(_))
        ));

        store.enrol_client(client.client_id).unwrap();
        store.enrol_client(client.client_id).unwrap();

        let invoice = store
            .send_invoice_aici(invoice.invoice_id, RoundingPolicy::HalfUp2)
            .unwrap();
        assert_eq!(invoice.advance, Decimal::from(135));
        assert_eq!(invoice.remainder, Decimal::from(135));
        assert_eq!(invoice.status, InvoiceStatus::Accepted);
        let urssaf_ref = invoice.urssaf_ref.unwrap();
        assert!(urssaf_ref.starts_with("URSSAF-"));
        assert_eq!(urssaf_ref.len(), "URSSAF-".len() + 8);
    }

    #[test]
    fn create_invoice_requires_lines_and_known_client() {
        let store = store();
        assert!(matches!(
            store.create_invoice(CreateInvoice {
                client_id: Uuid::new_v4(),
                lines: vec![line("Tonte", 1, 50)],
            }),
            Err(AppError::NotFound(_))
        ));

        let client = store
            .create_client(CreateClient {
                last_name: "Martin".to_string(),
                first_name: "Paul".to_string(),
                email: "p@test.com".to_string(),
                address: "Rennes".to_string(),
            })
            .unwrap();
        assert!(matches!(
            store.create_invoice(CreateInvoice {
                client_id: client.client_id,
                lines: vec![],
            }),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn snapshot_round_trip_preserves_clients_and_invoices() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db_aici.json");

        let store = LedgerStore::new(Some(path.clone())).unwrap();
        let client = store
            .create_client(CreateClient {
                last_name: "Dupont".to_string(),
                first_name: "Marie".to_string(),
                email: "marie@test.com".to_string(),
                address: "Rennes".to_string(),
            })
            .unwrap();
        store
            .create_invoice(CreateInvoice {
                client_id: client.client_id,
                lines: vec![line("Jardinage", 1, 80)],
            })
            .unwrap();
        store
            .submit_entry(
                &submit("Mme Dupont", "Jardinage", "", "80"),
                RoundingPolicy::HalfUp2,
            )
            .unwrap();
        drop(store);

        let reloaded = LedgerStore::new(Some(path)).unwrap();
        assert_eq!(reloaded.list_clients().len(), 1);
        assert_eq!(reloaded.list_invoices().len(), 1);
        assert_eq!(
            reloaded.list_invoices()[0].total,
            Decimal::from_str("80").unwrap()
        );
        // The simulation ledger is not persisted: seeds only after reload
        assert_eq!(reloaded.history().len(), 2);
    }
}

use std::sync::Arc;

use campaign_ledger_core::accounts::{AccountService, NewAccount};
use campaign_ledger_core::campaign::{CampaignDate, CampaignRepository, CampaignService};
use campaign_ledger_core::documents::{
    CostDocument, Document, DocumentBridge, IncomeDocument, RecurringDocumentProducer,
};
use campaign_ledger_core::transactions::{
    LedgerService, LedgerServiceTrait, NewLedgerEntry, RelatedEntity, TransactionRepository,
    TransactionStatus,
};
use rust_decimal_macros::dec;

mod common;

fn contract(account_id: &str) -> IncomeDocument {
    IncomeDocument {
        id: "contract-7".to_string(),
        account_id: account_id.to_string(),
        description: "Freight run to Regina".to_string(),
        amount: "1000.00".to_string(),
        bonus: None,
        deposit: Some("300.00".to_string()),
        signed_day: 10,
        signed_year: 1105,
        payment_day: Some(50),
        payment_year: Some(1105),
        cancel_day: None,
        cancel_year: None,
    }
}

#[test]
fn composite_income_posts_deposit_and_balance() {
    let pool = common::setup_pool("bridge_income");

    let account_service = AccountService::new(pool.clone());
    let campaign_service = CampaignService::new(pool.clone());
    let clock = Arc::new(CampaignRepository::new(pool.clone()));
    let bridge = DocumentBridge::new(Arc::new(LedgerService::new(pool.clone(), clock)));

    let account = account_service
        .create_account(NewAccount {
            id: Some("marava".to_string()),
            name: "Far Trader Marava".to_string(),
            is_active: true,
        })
        .unwrap();

    campaign_service
        .set_current_date(CampaignDate::new(60, 1105))
        .unwrap();

    let created = bridge
        .document_created(&Document::Income(contract(&account.id)))
        .unwrap();

    assert_eq!(created.len(), 2);
    assert_eq!(created[0].amount, dec!(300.00));
    assert_eq!(created[0].session_day, 10);
    assert_eq!(created[0].status, TransactionStatus::Posted);
    assert_eq!(created[1].amount, dec!(700.00));
    assert_eq!(created[1].session_day, 50);
    assert_eq!(created[1].status, TransactionStatus::Posted);
    assert_eq!(account_service.get_balance(&account.id).unwrap(), dec!(1000.00));
}

#[test]
fn document_updates_are_idempotent() {
    let pool = common::setup_pool("bridge_idempotent");

    let account_service = AccountService::new(pool.clone());
    let campaign_service = CampaignService::new(pool.clone());
    let clock = Arc::new(CampaignRepository::new(pool.clone()));
    let bridge = DocumentBridge::new(Arc::new(LedgerService::new(pool.clone(), clock)));
    let repository = TransactionRepository::new(pool.clone());

    let account = account_service
        .create_account(NewAccount {
            id: None,
            name: "Idempotence".to_string(),
            is_active: true,
        })
        .unwrap();

    campaign_service
        .set_current_date(CampaignDate::new(60, 1105))
        .unwrap();

    let doc = Document::Income(contract(&account.id));
    bridge.document_created(&doc).unwrap();
    let balance_once = account_service.get_balance(&account.id).unwrap();

    // Re-running the update with identical fields must not change anything.
    bridge.document_updated(&doc).unwrap();
    bridge.document_updated(&doc).unwrap();

    assert_eq!(account_service.get_balance(&account.id).unwrap(), balance_once);
    assert_eq!(
        repository
            .get_by_related(&RelatedEntity::Income("contract-7".to_string()))
            .unwrap()
            .len(),
        2
    );
}

#[test]
fn an_update_that_cancels_reverses_posted_entries() {
    let pool = common::setup_pool("bridge_cancel_update");

    let account_service = AccountService::new(pool.clone());
    let campaign_service = CampaignService::new(pool.clone());
    let clock = Arc::new(CampaignRepository::new(pool.clone()));
    let bridge = DocumentBridge::new(Arc::new(LedgerService::new(pool.clone(), clock)));
    let repository = TransactionRepository::new(pool.clone());

    let account = account_service
        .create_account(NewAccount {
            id: None,
            name: "Cancelled Update".to_string(),
            is_active: true,
        })
        .unwrap();

    campaign_service
        .set_current_date(CampaignDate::new(60, 1105))
        .unwrap();

    bridge
        .document_created(&Document::Income(contract(&account.id)))
        .unwrap();
    assert_eq!(account_service.get_balance(&account.id).unwrap(), dec!(1000.00));

    // Cancellation lands before the payment date, so the update recreates
    // both entries as VOID and takes back the posted amounts.
    let mut doc = contract(&account.id);
    doc.cancel_day = Some(20);
    doc.cancel_year = Some(1105);
    let recreated = bridge.document_updated(&Document::Income(doc)).unwrap();

    assert_eq!(recreated.len(), 2);
    assert_eq!(account_service.get_balance(&account.id).unwrap(), dec!(0));

    let rows = repository
        .get_by_related(&RelatedEntity::Income("contract-7".to_string()))
        .unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|t| t.status == TransactionStatus::Void));
}

#[test]
fn updating_an_unpaid_contract_is_a_noop_reverse() {
    let pool = common::setup_pool("bridge_unpaid");

    let account_service = AccountService::new(pool.clone());
    let clock = Arc::new(CampaignRepository::new(pool.clone()));
    let bridge = DocumentBridge::new(Arc::new(LedgerService::new(pool.clone(), clock)));
    let repository = TransactionRepository::new(pool.clone());

    let account = account_service
        .create_account(NewAccount {
            id: None,
            name: "Unpaid".to_string(),
            is_active: true,
        })
        .unwrap();

    // Signed but unpaid, no deposit: produces no entries, and updating it
    // must reverse nothing without erroring.
    let mut doc = contract(&account.id);
    doc.deposit = None;
    doc.payment_day = None;
    doc.payment_year = None;

    let created = bridge.document_updated(&Document::Income(doc)).unwrap();
    assert!(created.is_empty());
    assert!(repository.get_by_account(&account.id).unwrap().is_empty());
}

#[test]
fn cancelled_cost_documents_create_void_entries() {
    let pool = common::setup_pool("bridge_cancelled");

    let account_service = AccountService::new(pool.clone());
    let clock = Arc::new(CampaignRepository::new(pool.clone()));
    let bridge = DocumentBridge::new(Arc::new(LedgerService::new(pool.clone(), clock)));
    let repository = TransactionRepository::new(pool.clone());

    let account = account_service
        .create_account(NewAccount {
            id: None,
            name: "Cancelled".to_string(),
            is_active: true,
        })
        .unwrap();

    let doc = CostDocument {
        id: "berth-3".to_string(),
        account_id: account.id.clone(),
        description: "Berthing fees".to_string(),
        amount: "150.00".to_string(),
        due_day: 40,
        due_year: 1105,
        cancel_day: Some(20),
        cancel_year: Some(1105),
    };

    let created = bridge.document_created(&Document::Cost(doc)).unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].status, TransactionStatus::Void);
    assert_eq!(created[0].amount, dec!(-150.00));
    assert_eq!(account_service.get_balance(&account.id).unwrap(), dec!(0));

    // The audit row survives with its pointer intact.
    let rows = repository
        .get_by_related(&RelatedEntity::Cost("berth-3".to_string()))
        .unwrap();
    assert_eq!(rows.len(), 1);
}

struct FixedCharges {
    docs: Vec<Document>,
}

impl RecurringDocumentProducer for FixedCharges {
    fn documents_due(&self, _up_to: CampaignDate) -> campaign_ledger_core::Result<Vec<Document>> {
        Ok(self.docs.clone())
    }
}

#[test]
fn advancing_the_clock_applies_recurring_charges_before_syncing() {
    let pool = common::setup_pool("bridge_recurring");

    let account_service = AccountService::new(pool.clone());
    let campaign_service = CampaignService::new(pool.clone());
    let clock = Arc::new(CampaignRepository::new(pool.clone()));
    let ledger = Arc::new(LedgerService::new(pool.clone(), clock));
    let bridge = DocumentBridge::new(ledger.clone());

    let account = account_service
        .create_account(NewAccount {
            id: Some("recurring".to_string()),
            name: "Recurring".to_string(),
            is_active: true,
        })
        .unwrap();

    // Seed funds effective from the campaign start.
    ledger
        .deposit(NewLedgerEntry {
            account_id: account.id.clone(),
            amount: dec!(500.00),
            description: "Seed".to_string(),
            session_day: 1,
            session_year: 1105,
            related: None,
            forced_status: None,
        })
        .unwrap();

    let producer = FixedCharges {
        docs: vec![Document::Cost(CostDocument {
            id: "salary-1105-30".to_string(),
            account_id: account.id.clone(),
            description: "Crew salaries".to_string(),
            amount: "100.00".to_string(),
            due_day: 30,
            due_year: 1105,
            cancel_day: None,
            cancel_year: None,
        })],
    };

    campaign_service
        .advance_clock(CampaignDate::new(30, 1105), &producer, &bridge)
        .unwrap();

    // The charge was both created and already posted by the sync pass.
    assert_eq!(account_service.get_balance(&account.id).unwrap(), dec!(400.00));
}

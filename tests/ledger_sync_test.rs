use std::sync::Arc;

use campaign_ledger_core::accounts::{AccountService, NewAccount};
use campaign_ledger_core::campaign::{CampaignDate, CampaignRepository, CampaignService};
use campaign_ledger_core::transactions::{
    LedgerService, LedgerServiceTrait, NewLedgerEntry, TransactionRepository, TransactionStatus,
};
use rust_decimal_macros::dec;

mod common;

fn entry(account_id: &str, amount: rust_decimal::Decimal, day: i32, year: i32) -> NewLedgerEntry {
    NewLedgerEntry {
        account_id: account_id.to_string(),
        amount,
        description: format!("entry at {}/{}", day, year),
        session_day: day,
        session_year: year,
        related: None,
        forced_status: None,
    }
}

#[test]
fn deposits_and_withdrawals_follow_the_campaign_clock() {
    let pool = common::setup_pool("ledger_clock");

    let account_service = AccountService::new(pool.clone());
    let campaign_service = CampaignService::new(pool.clone());
    let clock = Arc::new(CampaignRepository::new(pool.clone()));
    let ledger = LedgerService::new(pool.clone(), clock);
    let repository = TransactionRepository::new(pool.clone());

    let account = account_service
        .create_account(NewAccount {
            id: Some("beowulf".to_string()),
            name: "Free Trader Beowulf".to_string(),
            is_active: true,
        })
        .unwrap();
    assert_eq!(account.credits, dec!(0));

    // Seed balance of 1000.00 at the campaign's starting date (1/1105).
    ledger.deposit(entry(&account.id, dec!(1000.00), 1, 1105)).unwrap();
    campaign_service
        .set_current_date(CampaignDate::new(100, 1105))
        .unwrap();
    assert_eq!(account_service.get_balance(&account.id).unwrap(), dec!(1000.00));

    // Deposit dated today posts immediately.
    let posted = ledger.deposit(entry(&account.id, dec!(500.00), 100, 1105)).unwrap();
    assert_eq!(posted.status, TransactionStatus::Posted);
    assert_eq!(account_service.get_balance(&account.id).unwrap(), dec!(1500.00));

    // Deposit dated tomorrow stays pending and leaves the balance alone.
    let pending = ledger.deposit(entry(&account.id, dec!(500.00), 101, 1105)).unwrap();
    assert_eq!(pending.status, TransactionStatus::Pending);
    assert_eq!(account_service.get_balance(&account.id).unwrap(), dec!(1500.00));

    // Withdrawal dated today posts with a negated amount.
    let withdrawal = ledger.withdraw(entry(&account.id, dec!(200.00), 100, 1105)).unwrap();
    assert_eq!(withdrawal.amount, dec!(-200.00));
    assert_eq!(account_service.get_balance(&account.id).unwrap(), dec!(1300.00));

    // Moving the clock forward posts the pending deposit.
    campaign_service
        .set_current_date(CampaignDate::new(101, 1105))
        .unwrap();
    assert_eq!(account_service.get_balance(&account.id).unwrap(), dec!(1800.00));
    assert!(repository
        .get_by_account_and_status(&account.id, TransactionStatus::Pending)
        .unwrap()
        .is_empty());

    // Time travel backwards unposts everything after the new date.
    campaign_service
        .set_current_date(CampaignDate::new(99, 1105))
        .unwrap();
    assert_eq!(account_service.get_balance(&account.id).unwrap(), dec!(1000.00));
    assert_eq!(
        repository
            .get_by_account_and_status(&account.id, TransactionStatus::Pending)
            .unwrap()
            .len(),
        3
    );

    // Returning to a later date restores the same balance; flips depend
    // only on each entry's own amount, so no history was lost.
    campaign_service
        .set_current_date(CampaignDate::new(150, 1105))
        .unwrap();
    assert_eq!(account_service.get_balance(&account.id).unwrap(), dec!(1800.00));

    // Syncing again at the same date changes nothing.
    campaign_service
        .set_current_date(CampaignDate::new(150, 1105))
        .unwrap();
    assert_eq!(account_service.get_balance(&account.id).unwrap(), dec!(1800.00));
}

#[test]
fn forced_void_entries_never_touch_the_balance() {
    let pool = common::setup_pool("ledger_void");

    let account_service = AccountService::new(pool.clone());
    let campaign_service = CampaignService::new(pool.clone());
    let clock = Arc::new(CampaignRepository::new(pool.clone()));
    let ledger = LedgerService::new(pool.clone(), clock);
    let repository = TransactionRepository::new(pool.clone());

    let account = account_service
        .create_account(NewAccount {
            id: None,
            name: "Void Test".to_string(),
            is_active: true,
        })
        .unwrap();

    let mut voided = entry(&account.id, dec!(900.00), 1, 1105);
    voided.forced_status = Some(TransactionStatus::Void);
    let tx = ledger.deposit(voided).unwrap();
    assert_eq!(tx.status, TransactionStatus::Void);
    assert_eq!(account_service.get_balance(&account.id).unwrap(), dec!(0));

    // Sync passes leave VOID entries alone in both directions.
    campaign_service
        .set_current_date(CampaignDate::new(300, 1105))
        .unwrap();
    campaign_service
        .set_current_date(CampaignDate::new(1, 1100))
        .unwrap();

    let all = repository.get_by_account(&account.id).unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].status, TransactionStatus::Void);
    assert_eq!(account_service.get_balance(&account.id).unwrap(), dec!(0));
}

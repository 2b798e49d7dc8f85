mod common;

use anchor_lang::AccountDeserialize;
use common::svm::{self, LAMPORTS_PER_SIGNATURE};
use common::LAMPORTS_PER_SOL;
use data_store::Data;
use data_store_client::{derive_address, instructions};
use litesvm::LiteSVM;
use solana_keypair::Keypair;
use solana_pubkey::Pubkey;
use solana_signer::Signer;

fn setup() -> (LiteSVM, Keypair, Pubkey) {
    let (svm, user) = svm::setup(svm::to_svm_key(&data_store::ID), svm::ANCHOR_SO);
    let (pda, _) = derive_address(&data_store::ID, &svm::to_anchor_key(&user.pubkey()));
    (svm, user, svm::to_svm_key(&pda))
}

fn stored(svm: &LiteSVM, pda: &Pubkey) -> Data {
    let account = svm.get_account(pda).expect("data account missing");
    Data::try_deserialize(&mut account.data.as_slice()).unwrap()
}

fn init(svm: &mut LiteSVM, user: &Keypair) -> bool {
    let owner = svm::to_anchor_key(&user.pubkey());
    svm::send(svm, user, svm::to_svm_ix(instructions::init(&data_store::ID, &owner))).is_ok()
}

fn update(svm: &mut LiteSVM, user: &Keypair, data: &[u8]) -> bool {
    let owner = svm::to_anchor_key(&user.pubkey());
    let ix = instructions::update(&data_store::ID, &owner, data.to_vec());
    svm::send(svm, user, svm::to_svm_ix(ix)).is_ok()
}

fn close(svm: &mut LiteSVM, user: &Keypair) -> bool {
    let owner = svm::to_anchor_key(&user.pubkey());
    svm::send(svm, user, svm::to_svm_ix(instructions::close(&data_store::ID, &owner))).is_ok()
}

#[test]
#[ignore = "requires the program built with cargo build-sbf"]
fn init_grow_shrink_close() {
    let (mut svm, user, pda) = setup();
    let mut fees = 0;

    assert!(init(&mut svm, &user));
    fees += LAMPORTS_PER_SIGNATURE;
    let data = stored(&svm, &pda);
    assert_eq!(data.auth, svm::to_anchor_key(&user.pubkey()));
    assert!(data.data.is_empty());
    assert_eq!(
        svm::lamports(&svm, &pda),
        svm.minimum_balance_for_rent_exemption(Data::space_for(0))
    );

    for payload in [&b"AAA"[..], &b"AAAAAAAAAAAAAAAAAAAA"[..], &b"B"[..], &b""[..]] {
        assert!(update(&mut svm, &user, payload));
        fees += LAMPORTS_PER_SIGNATURE;

        assert_eq!(stored(&svm, &pda).data, payload);
        let held = svm::lamports(&svm, &pda);
        assert_eq!(
            held,
            svm.minimum_balance_for_rent_exemption(Data::space_for(payload.len()))
        );
        assert_eq!(
            svm::lamports(&svm, &user.pubkey()) + held,
            2 * LAMPORTS_PER_SOL - fees
        );
    }

    assert!(close(&mut svm, &user));
    fees += LAMPORTS_PER_SIGNATURE;
    assert_eq!(svm::lamports(&svm, &pda), 0);
    assert_eq!(
        svm::lamports(&svm, &user.pubkey()),
        2 * LAMPORTS_PER_SOL - fees
    );
}

#[test]
#[ignore = "requires the program built with cargo build-sbf"]
fn lifecycle_errors() {
    let (mut svm, user, pda) = setup();

    assert!(!update(&mut svm, &user, b"AAA"));
    assert!(!close(&mut svm, &user));

    assert!(init(&mut svm, &user));
    assert!(!init(&mut svm, &user));
    assert!(!update(&mut svm, &user, &vec![0; data_store::MAX_PAYLOAD_LEN + 1]));
    assert!(stored(&svm, &pda).data.is_empty());

    assert!(close(&mut svm, &user));
    assert!(init(&mut svm, &user));
    assert!(update(&mut svm, &user, b"reused"));
    assert_eq!(stored(&svm, &pda).data, b"reused");
}

#[test]
#[ignore = "requires the program built with cargo build-sbf"]
fn surplus_lamports_are_refunded_on_update() {
    let (mut svm, user, pda) = setup();
    assert!(init(&mut svm, &user));

    svm.airdrop(&pda, 1_000_000).expect("airdrop failed");
    let before = svm::lamports(&svm, &user.pubkey());

    assert!(update(&mut svm, &user, b"AAA"));
    let reserve = svm.minimum_balance_for_rent_exemption(Data::space_for(3));
    let grew_by = reserve - svm.minimum_balance_for_rent_exemption(Data::space_for(0));
    assert_eq!(svm::lamports(&svm, &pda), reserve);
    assert_eq!(
        svm::lamports(&svm, &user.pubkey()),
        before + 1_000_000 - grew_by - LAMPORTS_PER_SIGNATURE
    );
}

#[test]
#[ignore = "requires the program built with cargo build-sbf"]
fn other_signer_cannot_touch_the_account() {
    let (mut svm, owner, pda) = setup();
    assert!(init(&mut svm, &owner));

    let intruder = Keypair::new();
    svm.airdrop(&intruder.pubkey(), LAMPORTS_PER_SOL)
        .expect("airdrop failed");

    // the intruder's own PDA differs, so point the instruction at the owner's
    let mut ix = svm::to_svm_ix(instructions::close(
        &data_store::ID,
        &svm::to_anchor_key(&intruder.pubkey()),
    ));
    ix.accounts[1].pubkey = pda;
    assert!(svm::send(&mut svm, &intruder, ix).is_err());
    assert!(svm.get_account(&pda).is_some());
}

//! Runs the compiled programs in litesvm.
//!
//! The `.so` files come from `cargo build-sbf`, so tests using this module are
//! `#[ignore]`d by default. Run them with `cargo test -- --ignored` after
//! building both programs.

use litesvm::types::FailedTransactionMetadata;
use litesvm::LiteSVM;
use solana_instruction::{AccountMeta, Instruction};
use solana_keypair::Keypair;
use solana_message::Message;
use solana_pubkey::Pubkey;
use solana_signer::Signer;
use solana_transaction::Transaction;

use super::LAMPORTS_PER_SOL;

pub const ANCHOR_SO: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../target/deploy/data_store.so"
);
pub const NATIVE_SO: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../programs/data-store/pinocchio/target/deploy/data_store_pinocchio.so"
);

/// Base fee the runtime charges per signature.
pub const LAMPORTS_PER_SIGNATURE: u64 = 5_000;

/// A fresh VM with the program at `path` loaded under `program_id`, and a
/// user holding 2 SOL.
pub fn setup(program_id: Pubkey, path: &str) -> (LiteSVM, Keypair) {
    super::init_tracing();
    let mut svm = LiteSVM::new();
    svm.add_program_from_file(program_id, path)
        .unwrap_or_else(|e| panic!("failed to load {path}: {e}"));

    let user = Keypair::new();
    svm.airdrop(&user.pubkey(), 2 * LAMPORTS_PER_SOL)
        .expect("airdrop failed");
    (svm, user)
}

/// Sign and send `ix` with `payer` as the only signer.
pub fn send(
    svm: &mut LiteSVM,
    payer: &Keypair,
    ix: Instruction,
) -> Result<(), FailedTransactionMetadata> {
    let msg = Message::new(&[ix], Some(&payer.pubkey()));
    let tx = Transaction::new(&[payer], msg, svm.latest_blockhash());
    let result = svm.send_transaction(tx).map(|_| ());
    // identical instructions would otherwise produce identical signatures
    svm.expire_blockhash();
    result
}

pub fn lamports(svm: &LiteSVM, address: &Pubkey) -> u64 {
    svm.get_account(address).map_or(0, |account| account.lamports)
}

/// The litesvm key for an `anchor-lang` key.
pub fn to_svm_key(key: &anchor_lang::prelude::Pubkey) -> Pubkey {
    Pubkey::new_from_array(key.to_bytes())
}

pub fn to_anchor_key(key: &Pubkey) -> anchor_lang::prelude::Pubkey {
    anchor_lang::prelude::Pubkey::new_from_array(key.to_bytes())
}

/// Re-type an instruction built by `data_store_client::instructions`.
pub fn to_svm_ix(ix: anchor_lang::solana_program::instruction::Instruction) -> Instruction {
    Instruction {
        program_id: to_svm_key(&ix.program_id),
        accounts: ix
            .accounts
            .into_iter()
            .map(|meta| AccountMeta {
                pubkey: to_svm_key(&meta.pubkey),
                is_signer: meta.is_signer,
                is_writable: meta.is_writable,
            })
            .collect(),
        data: ix.data,
    }
}

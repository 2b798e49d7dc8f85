//! Program-derived addresses of data accounts.
//!
//! Both functions are pure: the same `(program_id, owner)` always yields the
//! same address, and two owners only collide if SHA-256 does.

use anchor_lang::prelude::Pubkey;

/// Address and canonical bump of the Anchor data account `["data", owner]`.
pub fn derive_address(program_id: &Pubkey, owner: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[data_store::SEED, owner.as_ref()], program_id)
}

/// Address and canonical bump of the Pinocchio data account `[owner]`.
pub fn derive_native_address(program_id: &Pubkey, owner: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[owner.as_ref()], program_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_is_off_curve_and_program_specific() {
        let owner = Pubkey::new_unique();
        let (address, _) = derive_address(&data_store::ID, &owner);
        assert!(!address.is_on_curve());

        let (other, _) = derive_address(&Pubkey::new_unique(), &owner);
        assert_ne!(address, other);
    }

    #[test]
    fn seed_prefix_separates_the_two_programs() {
        let program_id = Pubkey::new_unique();
        let owner = Pubkey::new_unique();
        assert_ne!(
            derive_address(&program_id, &owner).0,
            derive_native_address(&program_id, &owner).0
        );
    }

    #[test]
    fn bump_reproduces_the_address() {
        let owner = Pubkey::new_unique();
        let (address, bump) = derive_address(&data_store::ID, &owner);
        let recreated = Pubkey::create_program_address(
            &[data_store::SEED, owner.as_ref(), &[bump]],
            &data_store::ID,
        )
        .unwrap();
        assert_eq!(address, recreated);
    }
}

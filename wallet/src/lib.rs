use {bevy::prelude::*, std::collections::HashMap};

/// Currency earned by baking, spent on regular upgrades.
pub const COOKIES: &str = "cookies";
/// Prestige currency, spent on heavenly upgrades.
pub const HEAVENLY_CHIPS: &str = "heavenly_chips";

#[derive(Resource, Reflect, Default, Debug, Clone)]
#[reflect(Resource, Default)]
pub struct Wallet {
    pub resources: HashMap<String, u64>,
}

impl Wallet {
    pub fn balance(&self, currency: &str) -> u64 {
        self.resources.get(currency).copied().unwrap_or(0)
    }

    pub fn deposit(&mut self, currency: &str, amount: u64) {
        *self.resources.entry(currency.to_string()).or_default() += amount;
    }

    /// Takes `amount` out of the wallet. Returns `false` and leaves the
    /// balance alone when there is not enough.
    pub fn try_spend(&mut self, currency: &str, amount: u64) -> bool {
        let balance = self.balance(currency);
        if balance < amount {
            return false;
        }
        self.resources.insert(currency.to_string(), balance - amount);
        true
    }
}

pub struct WalletPlugin;

impl Plugin for WalletPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<Wallet>().init_resource::<Wallet>();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spending_more_than_balance_is_refused() {
        let mut wallet = Wallet::default();
        wallet.deposit(HEAVENLY_CHIPS, 500);

        assert!(!wallet.try_spend(HEAVENLY_CHIPS, 999));
        assert_eq!(wallet.balance(HEAVENLY_CHIPS), 500);

        assert!(wallet.try_spend(HEAVENLY_CHIPS, 200));
        assert_eq!(wallet.balance(HEAVENLY_CHIPS), 300);
    }
}

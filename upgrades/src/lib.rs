//! The host's purchase registry.
//!
//! Upgrades are created once by whoever owns them (the host catalogue, or a
//! mod such as the cookie selector) and looked up by name afterwards.
//! Purchases go through [`BuyUpgrade`]; every attempt ends with a
//! [`PurchaseCompleted`] event, which is the extension point other crates
//! hook into instead of wrapping the purchase logic.

use {
    bevy::prelude::*,
    game_events::{GameReset, PurchaseCompleted},
    shared_components::Icon,
    std::collections::HashMap,
    wallet::{COOKIES, HEAVENLY_CHIPS, Wallet},
};

pub struct UpgradesPlugin;

impl Plugin for UpgradesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Upgrades>()
            .add_observer(purchase_upgrade)
            .add_observer(reset_upgrades);
    }
}

/// Which shop an upgrade belongs to. Decides currency and reset behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum UpgradePool {
    /// Bought with cookies, lost on every reset.
    Regular,
    /// Heavenly upgrade bought with chips, kept across soft resets.
    Prestige,
    /// Switch-like entry that opens a selector. Never bought.
    Toggle,
}

impl UpgradePool {
    pub fn currency(self) -> Option<&'static str> {
        match self {
            UpgradePool::Regular => Some(COOKIES),
            UpgradePool::Prestige => Some(HEAVENLY_CHIPS),
            UpgradePool::Toggle => None,
        }
    }
}

#[derive(Debug, Clone, Reflect)]
pub struct Upgrade {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub cost: u64,
    pub icon: Icon,
    pub pool: UpgradePool,
    pub bought: bool,
    pub unlocked: bool,
    /// Prestige upgrades that have to be bought before this one.
    pub parents: Vec<String>,
    /// Sort key in the store.
    pub order: f32,
}

/// Everything needed to create a purchase entry.
#[derive(Debug, Clone)]
pub struct UpgradeSpec {
    pub name: String,
    pub description: String,
    pub cost: u64,
    pub icon: Icon,
    pub pool: UpgradePool,
}

impl UpgradeSpec {
    pub fn new(name: impl Into<String>, cost: u64, pool: UpgradePool) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            cost,
            icon: Icon::default(),
            pool,
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn icon(mut self, icon: Icon) -> Self {
        self.icon = icon;
        self
    }
}

#[derive(Resource, Default, Debug)]
pub struct Upgrades {
    entries: Vec<Upgrade>,
    by_name: HashMap<String, usize>,
}

impl Upgrades {
    /// Creates a purchase entry. Creating a name twice hands back the
    /// existing entry untouched.
    pub fn create(&mut self, spec: UpgradeSpec) -> &mut Upgrade {
        if let Some(&index) = self.by_name.get(&spec.name) {
            warn!(upgrade = %spec.name, "upgrade already exists, keeping the original");
            return &mut self.entries[index];
        }

        let id = self.entries.len() as u32;
        let index = self.entries.len();
        self.by_name.insert(spec.name.clone(), index);
        self.entries.push(Upgrade {
            id,
            name: spec.name,
            description: spec.description,
            cost: spec.cost,
            icon: spec.icon,
            pool: spec.pool,
            bought: false,
            unlocked: spec.pool == UpgradePool::Prestige,
            parents: Vec::new(),
            order: id as f32,
        });
        &mut self.entries[index]
    }

    pub fn get(&self, name: &str) -> Option<&Upgrade> {
        self.by_name.get(name).map(|&index| &self.entries[index])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Upgrade> {
        let index = *self.by_name.get(name)?;
        Some(&mut self.entries[index])
    }

    pub fn is_bought(&self, name: &str) -> bool {
        self.get(name).is_some_and(|upgrade| upgrade.bought)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Upgrade> {
        self.entries.iter()
    }

    /// Whether the store would accept a purchase of `name` right now,
    /// ignoring the price.
    pub fn can_purchase(&self, name: &str) -> bool {
        let Some(upgrade) = self.get(name) else {
            return false;
        };
        if upgrade.bought || upgrade.pool == UpgradePool::Toggle {
            return false;
        }
        match upgrade.pool {
            UpgradePool::Prestige => upgrade.parents.iter().all(|p| self.is_bought(p)),
            _ => upgrade.unlocked,
        }
    }
}

/// Request to buy the upgrade named `upgrade`.
#[derive(Debug, Clone, Event)]
pub struct BuyUpgrade {
    pub upgrade: String,
}

fn purchase_upgrade(
    trigger: On<BuyUpgrade>,
    mut commands: Commands,
    mut upgrades: ResMut<Upgrades>,
    mut wallet: ResMut<Wallet>,
) {
    let name = &trigger.event().upgrade;

    let success = if !upgrades.can_purchase(name) {
        warn!(upgrade = %name, "upgrade is unknown, locked or already bought");
        false
    } else if let Some(upgrade) = upgrades.get_mut(name) {
        let paid = upgrade
            .pool
            .currency()
            .is_some_and(|currency| wallet.try_spend(currency, upgrade.cost));
        if paid {
            upgrade.bought = true;
            info!(upgrade = %name, cost = upgrade.cost, "purchased upgrade");
        } else {
            debug!(upgrade = %name, cost = upgrade.cost, "cannot afford upgrade");
        }
        paid
    } else {
        false
    };

    commands.trigger(PurchaseCompleted {
        upgrade: name.clone(),
        success,
    });
}

fn reset_upgrades(trigger: On<GameReset>, mut upgrades: ResMut<Upgrades>, mut wallet: ResMut<Wallet>) {
    let hard = trigger.event().hard;
    info!(%hard, "resetting upgrades");

    for upgrade in upgrades.entries.iter_mut() {
        if hard || upgrade.pool == UpgradePool::Regular {
            upgrade.bought = false;
        }
    }

    if hard {
        wallet.resources.clear();
    } else {
        wallet.resources.remove(COOKIES);
    }
}

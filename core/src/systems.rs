use {
    bevy::prelude::*,
    cookie_selector::{HEAVENLY_COOKIES, SelectorConfig},
    game_assets::HostAssetTable,
    game_events::{GameReset, Reincarnated},
    shared_components::Icon,
    skin_components::AssetKind,
    upgrades::{BuyUpgrade, UpgradePool, UpgradeSpec, Upgrades},
    wallet::{HEAVENLY_CHIPS, Wallet},
};

/// Prestige root every heavenly cookie hangs off.
const WALLPAPERS: &str = "Basic wallpaper assortment";
const STARTING_CHIPS: u64 = 2_500;

const DIGITS: [KeyCode; 9] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
    KeyCode::Digit9,
];

/// Sprite drawn from a host asset table slot.
#[derive(Component)]
pub struct SlotSprite {
    pub slot: &'static str,
}

/// Fills the store with the host's own heavenly upgrades.
pub fn seed_host_catalogue(mut upgrades: ResMut<Upgrades>, mut wallet: ResMut<Wallet>) {
    upgrades.create(
        UpgradeSpec::new(WALLPAPERS, 99, UpgradePool::Prestige)
            .describe("Lets you change the background.")
            .icon(Icon::new(29, 5)),
    );

    for (index, (name, _)) in HEAVENLY_COOKIES.into_iter().enumerate() {
        let cost = 3 * 10u64.pow(index.min(5) as u32);
        let upgrade = upgrades.create(
            UpgradeSpec::new(name, cost, UpgradePool::Prestige)
                .describe("Cookie production multiplier +10% permanently.")
                .icon(Icon::new(25 + index as u32 % 3, 12 + index as u32 / 3)),
        );
        if index > 0 {
            upgrade.parents = vec![HEAVENLY_COOKIES[0].0.to_string()];
        }
    }

    wallet.deposit(HEAVENLY_CHIPS, STARTING_CHIPS);
    info!(chips = STARTING_CHIPS, "host catalogue ready");
}

pub fn spawn_perfect_cookie(mut commands: Commands, table: Res<HostAssetTable>) {
    for (kind, z) in [(AssetKind::Shadow, 0.0), (AssetKind::PerfectCookie, 1.0)] {
        let image = table.get(kind.slot()).cloned().unwrap_or_default();
        commands.spawn((
            Sprite::from_image(image),
            Transform::from_xyz(-200.0, 0.0, z),
            SlotSprite { slot: kind.slot() },
        ));
    }
}

/// Redraws slot sprites whenever the table changes.
pub fn sync_perfect_cookie_sprites(
    table: Res<HostAssetTable>,
    mut sprites: Query<(&mut Sprite, &SlotSprite)>,
) {
    if !table.is_changed() {
        return;
    }
    for (mut sprite, slot) in sprites.iter_mut() {
        if let Some(image) = table.get(slot.slot)
            && sprite.image != *image
        {
            sprite.image = image.clone();
        }
    }
}

/// Stand-ins for the host's own buttons: `W` buys the wallpapers, `G` the
/// selector gate and `1`-`9` the heavenly cookies. `A` ascends and `H`
/// wipes the save.
pub fn handle_host_keys(
    keyboard: Res<ButtonInput<KeyCode>>,
    config: Res<SelectorConfig>,
    mut commands: Commands,
) {
    if keyboard.just_pressed(KeyCode::KeyW) {
        commands.trigger(BuyUpgrade {
            upgrade: WALLPAPERS.to_string(),
        });
    }

    if keyboard.just_pressed(KeyCode::KeyG) {
        commands.trigger(BuyUpgrade {
            upgrade: config.gating_upgrade.clone(),
        });
    }

    for (key, (name, _)) in DIGITS.into_iter().zip(HEAVENLY_COOKIES) {
        if keyboard.just_pressed(key) {
            commands.trigger(BuyUpgrade {
                upgrade: name.to_string(),
            });
        }
    }

    if keyboard.just_pressed(KeyCode::KeyA) {
        info!("ascending");
        commands.trigger(GameReset { hard: false });
        commands.trigger(Reincarnated);
    }

    if keyboard.just_pressed(KeyCode::KeyH) {
        info!("hard reset");
        commands.trigger(GameReset { hard: true });
    }
}

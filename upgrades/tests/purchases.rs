use {
    bevy::prelude::*,
    game_events::{GameReset, PurchaseCompleted},
    upgrades::*,
    wallet::{COOKIES, HEAVENLY_CHIPS, Wallet, WalletPlugin},
};

#[derive(Resource, Default)]
struct Completed(Vec<(String, bool)>);

fn app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins((WalletPlugin, UpgradesPlugin))
        .init_resource::<Completed>()
        .add_observer(
            |trigger: On<PurchaseCompleted>, mut completed: ResMut<Completed>| {
                let event = trigger.event();
                completed.0.push((event.upgrade.clone(), event.success));
            },
        );

    let mut upgrades = app.world_mut().resource_mut::<Upgrades>();
    upgrades.create(UpgradeSpec::new("Heavenly cookies", 3, UpgradePool::Prestige));
    upgrades.create(UpgradeSpec::new("Plain cookies", 100, UpgradePool::Regular)).unlocked = true;
    upgrades.create(UpgradeSpec::new("Dessert showcase", 999, UpgradePool::Prestige)).parents =
        vec!["Heavenly cookies".to_string()];
    app.update();
    app
}

fn buy(app: &mut App, name: &str) {
    app.world_mut().trigger(BuyUpgrade {
        upgrade: name.to_string(),
    });
    app.update();
}

#[test]
fn buying_with_enough_chips_marks_bought_and_reports_success() {
    let mut app = app();
    app.world_mut()
        .resource_mut::<Wallet>()
        .deposit(HEAVENLY_CHIPS, 10);

    buy(&mut app, "Heavenly cookies");

    assert!(app.world().resource::<Upgrades>().is_bought("Heavenly cookies"));
    assert_eq!(app.world().resource::<Wallet>().balance(HEAVENLY_CHIPS), 7);
    assert_eq!(
        app.world().resource::<Completed>().0,
        vec![("Heavenly cookies".to_string(), true)]
    );
}

#[test]
fn failed_purchases_still_report_completion() {
    let mut app = app();

    buy(&mut app, "Heavenly cookies");
    buy(&mut app, "No such upgrade");

    assert!(!app.world().resource::<Upgrades>().is_bought("Heavenly cookies"));
    assert_eq!(
        app.world().resource::<Completed>().0,
        vec![
            ("Heavenly cookies".to_string(), false),
            ("No such upgrade".to_string(), false),
        ]
    );
}

#[test]
fn prestige_upgrades_need_their_parents() {
    let mut app = app();
    app.world_mut()
        .resource_mut::<Wallet>()
        .deposit(HEAVENLY_CHIPS, 5000);

    buy(&mut app, "Dessert showcase");
    assert!(!app.world().resource::<Upgrades>().is_bought("Dessert showcase"));

    buy(&mut app, "Heavenly cookies");
    buy(&mut app, "Dessert showcase");
    assert!(app.world().resource::<Upgrades>().is_bought("Dessert showcase"));
}

#[test]
fn soft_reset_keeps_prestige_and_hard_reset_wipes_everything() {
    let mut app = app();
    {
        let mut wallet = app.world_mut().resource_mut::<Wallet>();
        wallet.deposit(HEAVENLY_CHIPS, 10);
        wallet.deposit(COOKIES, 1000);
    }
    buy(&mut app, "Heavenly cookies");
    buy(&mut app, "Plain cookies");

    app.world_mut().trigger(GameReset { hard: false });
    app.update();
    {
        let upgrades = app.world().resource::<Upgrades>();
        assert!(upgrades.is_bought("Heavenly cookies"));
        assert!(!upgrades.is_bought("Plain cookies"));
        assert_eq!(app.world().resource::<Wallet>().balance(COOKIES), 0);
    }

    app.world_mut().trigger(GameReset { hard: true });
    app.update();
    assert!(!app.world().resource::<Upgrades>().is_bought("Heavenly cookies"));
    assert_eq!(app.world().resource::<Wallet>().balance(HEAVENLY_CHIPS), 0);
}

#[test]
fn creating_an_existing_name_keeps_the_original() {
    let mut upgrades = Upgrades::default();
    upgrades.create(UpgradeSpec::new("Heavenly cookies", 3, UpgradePool::Prestige));
    let again = upgrades.create(UpgradeSpec::new("Heavenly cookies", 50, UpgradePool::Regular));

    assert_eq!(again.cost, 3);
    assert_eq!(again.pool, UpgradePool::Prestige);
    assert_eq!(upgrades.iter().count(), 1);
}

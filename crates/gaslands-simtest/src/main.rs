//! Gaslands Headless Rules Harness
//!
//! Validates catalog data and roster-building invariants without any UI.
//! Runs entirely in-process — no storage, no rendering.
//!
//! Usage:
//!   cargo run -p gaslands-simtest
//!   cargo run -p gaslands-simtest -- --verbose --seed 7 --steps 2000
//!   cargo run -p gaslands-simtest -- --json --budget 75

use std::str::FromStr;

use gaslands_rules::catalog::{
    default_weapon_kinds, mountable_weapon_kinds, upgrade_kinds, vehicle_kinds, weapon_kinds,
};
use gaslands_rules::config::{validate_roster, RosterConfig};
use gaslands_rules::eligibility::{can_add_upgrade, can_cycle_facing, can_remove_weapon};
use gaslands_rules::facing::{next_facing, ArcDirection, WeaponFacing, FACING_CYCLE_LEN};
use gaslands_rules::roster::{Roster, RosterAction};
use gaslands_rules::stats::{summarize, total_cost, VehicleSummary};
use gaslands_rules::upgrades::{quantity_limit, Quantity, UpgradeKind};
use gaslands_rules::vehicles::{ActiveVehicle, VehicleKind};
use gaslands_rules::weapons::{active_weapon_cost, WeaponKind};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ── Harness options ─────────────────────────────────────────────────────

struct Options {
    verbose: bool,
    json: bool,
    seed: u64,
    steps: usize,
    config: RosterConfig,
}

/// Value following `flag`, parsed as `T`. Unparseable values are ignored.
fn flag_value<T: FromStr>(args: &[String], flag: &str) -> Option<T> {
    let raw = args
        .iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("ignoring {flag} {raw:?}: not a valid value");
            None
        }
    }
}

impl Options {
    fn from_args() -> Self {
        let args: Vec<String> = std::env::args().skip(1).collect();
        Self::parse(&args)
    }

    fn parse(args: &[String]) -> Self {
        let mut config = RosterConfig::default();
        if let Some(budget) = flag_value(args, "--budget") {
            config.cans_budget = budget;
        }
        if let Some(max) = flag_value(args, "--max-vehicles") {
            config.max_vehicles = Some(max);
        }
        Self {
            verbose: args.iter().any(|a| a == "--verbose"),
            json: args.iter().any(|a| a == "--json"),
            seed: flag_value(args, "--seed").unwrap_or(42),
            steps: flag_value(args, "--steps").unwrap_or(500),
            config,
        }
    }
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info,gaslands_rules=error"),
    )
    .format_timestamp_secs()
    .try_init();

    let opts = Options::from_args();
    println!("=== Gaslands Rules Harness ===\n");
    log::info!(
        "seed={} steps={} budget={}",
        opts.seed,
        opts.steps,
        opts.config.cans_budget
    );

    let mut results = Vec::new();

    // 1. Catalog consistency
    results.extend(validate_catalog(opts.verbose));

    // 2. Facing state machine
    results.extend(validate_facing(opts.verbose));

    // 3. Quantity & eligibility rules
    results.extend(validate_eligibility(opts.verbose));

    // 4. Scripted build session
    results.extend(validate_build_session(&opts));

    // 5. Randomized edit sweep
    results.extend(validate_random_sweep(&opts));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || opts.verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        log::error!("{failed} checks failed");
        std::process::exit(1);
    }
}

// ── 1. Catalog ──────────────────────────────────────────────────────────

fn validate_catalog(verbose: bool) -> Vec<TestResult> {
    println!("--- Catalog ---");
    let mut results = Vec::new();

    results.push(TestResult {
        name: "catalog_counts".into(),
        passed: vehicle_kinds().len() == 7
            && weapon_kinds().len() == 4
            && upgrade_kinds().len() == 7,
        detail: format!(
            "vehicles={} weapons={} upgrades={}",
            vehicle_kinds().len(),
            weapon_kinds().len(),
            upgrade_kinds().len()
        ),
    });

    // Machine Gun profile is the rules-compatibility anchor
    let mg = WeaponKind::MachineGun.spec();
    results.push(TestResult {
        name: "catalog_machine_gun".into(),
        passed: mg.attack_dice == 2 && mg.build_slots == 1 && mg.cost == 2,
        detail: format!(
            "{:?} range, {}D6, {} slot, {} cans",
            mg.range, mg.attack_dice, mg.build_slots, mg.cost
        ),
    });

    // Default weapons are free, slotless and crew fired
    let defaults = default_weapon_kinds();
    let bad_defaults: Vec<_> = defaults
        .iter()
        .map(|w| w.spec())
        .filter(|s| s.cost != 0 || s.build_slots != 0 || !s.is_crew_fired())
        .map(|s| s.name)
        .collect();
    results.push(TestResult {
        name: "catalog_defaults_free".into(),
        passed: !defaults.is_empty() && bad_defaults.is_empty(),
        detail: if bad_defaults.is_empty() {
            format!("{} default weapon(s)", defaults.len())
        } else {
            format!("non-free defaults: {}", bad_defaults.join(", "))
        },
    });

    results.push(TestResult {
        name: "catalog_mountable_partition".into(),
        passed: defaults.len() + mountable_weapon_kinds().len() == weapon_kinds().len(),
        detail: format!("{} mountable weapons", mountable_weapon_kinds().len()),
    });

    // Vehicle profiles
    let bad_vehicles: Vec<_> = vehicle_kinds()
        .iter()
        .map(|v| v.spec())
        .filter(|s| s.cost == 0 || s.hull == 0 || s.crew == 0 || s.build_slots == 0)
        .map(|s| s.name)
        .collect();
    results.push(TestResult {
        name: "catalog_vehicle_profiles".into(),
        passed: bad_vehicles.is_empty(),
        detail: if bad_vehicles.is_empty() {
            "all vehicles have cost, hull, crew and slots".into()
        } else {
            format!("bad profiles: {}", bad_vehicles.join(", "))
        },
    });

    // Limited upgrades must allow at least one copy on every vehicle
    let mut zero_limits = Vec::new();
    for u in upgrade_kinds() {
        if let Quantity::Limited(_) = u.spec().quantity {
            for v in vehicle_kinds() {
                if quantity_limit(*u, &ActiveVehicle::new(*v)) == Some(0) {
                    zero_limits.push(format!("{}/{}", u.spec().name, v.spec().name));
                }
            }
        }
    }
    results.push(TestResult {
        name: "catalog_limits_positive".into(),
        passed: zero_limits.is_empty(),
        detail: if zero_limits.is_empty() {
            "every limited upgrade fits at least once".into()
        } else {
            format!("zero limits: {}", zero_limits.join(", "))
        },
    });

    if verbose {
        for v in vehicle_kinds() {
            let s = v.spec();
            println!(
                "    {:16} {:12} {:>2} cans  hull {:>2}  handling {}  gear {}  crew {}  slots {}",
                s.name,
                s.weight.label(),
                s.cost,
                s.hull,
                s.handling,
                s.max_gear,
                s.crew,
                s.build_slots
            );
        }
    }

    results
}

// ── 2. Facing ───────────────────────────────────────────────────────────

fn validate_facing(_verbose: bool) -> Vec<TestResult> {
    println!("--- Facing ---");
    let mut results = Vec::new();

    let directions = [
        ArcDirection::Front,
        ArcDirection::Rear,
        ArcDirection::Side,
        ArcDirection::Full,
    ];
    let closes = directions.iter().all(|d| {
        let start = WeaponFacing::UserSelected(*d);
        let end = (0..FACING_CYCLE_LEN).fold(start, |f, _| next_facing(f));
        end == start
    });
    results.push(TestResult {
        name: "facing_cycle_closes".into(),
        passed: closes,
        detail: format!("{FACING_CYCLE_LEN} cycles return to start"),
    });

    results.push(TestResult {
        name: "facing_crew_fired_fixed".into(),
        passed: next_facing(WeaponFacing::CrewFired) == WeaponFacing::CrewFired,
        detail: "crew-fired facing has no successor".into(),
    });

    // Turret price on every mountable weapon
    let mut wrong = Vec::new();
    for kind in mountable_weapon_kinds() {
        let vehicle = ActiveVehicle::new(VehicleKind::Car).with_weapon(kind);
        let index = vehicle.weapons.len() - 1;
        let turret = (0..3).fold(vehicle.clone(), |v, _| v.with_cycled_facing(index));
        let base = active_weapon_cost(&vehicle.weapons[index]);
        let surcharged = active_weapon_cost(&turret.weapons[index]);
        if surcharged != base * 3 || total_cost(&turret) - total_cost(&vehicle) != base * 2 {
            wrong.push(kind.spec().name);
        }
    }
    results.push(TestResult {
        name: "facing_turret_surcharge".into(),
        passed: wrong.is_empty(),
        detail: if wrong.is_empty() {
            "turrets cost 3× on every mountable weapon".into()
        } else {
            format!("wrong turret price: {}", wrong.join(", "))
        },
    });

    results
}

// ── 3. Eligibility ──────────────────────────────────────────────────────

fn validate_eligibility(verbose: bool) -> Vec<TestResult> {
    println!("--- Eligibility ---");
    let mut results = Vec::new();

    // Single upgrades
    let mut single_ok = true;
    for u in upgrade_kinds() {
        if u.spec().quantity != Quantity::Single {
            continue;
        }
        let twice = ActiveVehicle::new(VehicleKind::Car)
            .with_upgrade(*u)
            .with_upgrade(*u);
        if twice.upgrade_amount(*u) != 1 || can_add_upgrade(*u, &twice) {
            single_ok = false;
        }
    }
    results.push(TestResult {
        name: "eligibility_single_cap".into(),
        passed: single_ok,
        detail: "single upgrades never exceed 1".into(),
    });

    // Limited upgrades fill exactly to their limit on every vehicle
    let mut limited_ok = true;
    for v in vehicle_kinds() {
        for u in upgrade_kinds() {
            let Quantity::Limited(_) = u.spec().quantity else {
                continue;
            };
            let mut vehicle = ActiveVehicle::new(*v);
            let limit = quantity_limit(*u, &vehicle).unwrap_or(0);
            for _ in 0..limit + 2 {
                vehicle = vehicle.with_upgrade(*u);
            }
            if vehicle.upgrade_amount(*u) != limit || can_add_upgrade(*u, &vehicle) {
                limited_ok = false;
            }
            if verbose {
                println!(
                    "    {:16} {:28} limit {}",
                    v.spec().name,
                    u.spec().name,
                    limit
                );
            }
        }
    }
    results.push(TestResult {
        name: "eligibility_limited_cap".into(),
        passed: limited_ok,
        detail: "limited upgrades stop at their computed limit".into(),
    });

    // Default weapons
    let car = ActiveVehicle::new(VehicleKind::Car);
    results.push(TestResult {
        name: "eligibility_default_weapon_locked".into(),
        passed: !can_remove_weapon(&car, 0) && car.without_weapon(0) == car,
        detail: "default weapon cannot be removed".into(),
    });

    results
}

// ── 4. Scripted build session ───────────────────────────────────────────

fn validate_build_session(opts: &Options) -> Vec<TestResult> {
    println!("--- Build Session ---");
    let mut results = Vec::new();

    let roster = [
        RosterAction::AddVehicle(VehicleKind::Car),
        RosterAction::AddVehicle(VehicleKind::PickupTruck),
        RosterAction::AddVehicle(VehicleKind::Buggy),
    ]
    .into_iter()
    .fold(Roster::default(), |r, a| r.apply(a));

    let roster = roster
        .update_vehicle(0, |v| {
            v.with_weapon(WeaponKind::MachineGun).with_cycled_facing(1)
        })
        .update_vehicle(1, |v| {
            v.with_weapon(WeaponKind::HeavyMachineGun)
                .with_upgrade(UpgradeKind::ExtraCrewmember)
                .with_upgrade(UpgradeKind::Ram)
        })
        .apply(RosterAction::DuplicateVehicle(0))
        .apply(RosterAction::RemoveVehicle(2));

    let summaries: Vec<_> = roster.vehicles().iter().map(summarize).collect();
    let costs: Vec<u32> = summaries.iter().map(|s| s.cost).collect();
    // Car 12+2, Pickup 8+3+4+4, duplicate of the car
    results.push(TestResult {
        name: "session_costs".into(),
        passed: costs == vec![14, 19, 14],
        detail: format!("per-vehicle costs {:?}, total {}", costs, roster.total_cost()),
    });

    let kinds: Vec<_> = roster.vehicles().iter().map(|v| v.kind).collect();
    results.push(TestResult {
        name: "session_order".into(),
        passed: kinds == vec![VehicleKind::Car, VehicleKind::PickupTruck, VehicleKind::Car],
        detail: format!("{kinds:?}"),
    });

    let issues = validate_roster(&roster, &opts.config);
    for issue in &issues {
        log::warn!("roster warning: {issue:?}");
    }
    results.push(TestResult {
        name: "session_within_default_budget".into(),
        passed: roster.total_cost() <= RosterConfig::default().cans_budget,
        detail: format!("{} issue(s) against configured budget", issues.len()),
    });

    if opts.json {
        match serde_json::to_string_pretty(&roster) {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("roster serialization failed: {e}"),
        }
    }

    results
}

// ── 5. Randomized sweep ─────────────────────────────────────────────────

/// Invariant violations for one vehicle, if any.
fn vehicle_violations(vehicle: &ActiveVehicle) -> Vec<String> {
    let mut out = Vec::new();
    if let Err(e) = vehicle.validate() {
        out.push(e.to_string());
    }
    let (first, second) = (summarize(vehicle), summarize(vehicle));
    if first != second {
        out.push(format!("{}: non-deterministic summary", vehicle.kind.spec().name));
    }
    out
}

/// Steps between kept roster snapshots.
const SNAPSHOT_EVERY: usize = 25;

/// An earlier roster value and what it derived to when it was current.
struct Snapshot {
    step: usize,
    roster: Roster,
    cost: u32,
    summaries: Vec<VehicleSummary>,
}

impl Snapshot {
    fn take(step: usize, roster: &Roster) -> Self {
        Self {
            step,
            roster: roster.clone(),
            cost: roster.total_cost(),
            summaries: roster.vehicles().iter().map(summarize).collect(),
        }
    }

    /// Whether the kept roster now derives differently than when it was taken.
    fn is_stale(&self) -> bool {
        let summaries: Vec<_> = self.roster.vehicles().iter().map(summarize).collect();
        self.roster.total_cost() != self.cost || summaries != self.summaries
    }
}

fn random_edit(rng: &mut StdRng, roster: &Roster) -> Roster {
    let vehicles = vehicle_kinds();
    let weapons = mountable_weapon_kinds();
    let upgrades = upgrade_kinds();

    if roster.is_empty() || rng.gen_ratio(1, 10) {
        let kind = vehicles[rng.gen_range(0..vehicles.len())];
        return roster.add_vehicle(kind);
    }

    let index = rng.gen_range(0..roster.len());
    match rng.gen_range(0..9) {
        0 => roster.apply(RosterAction::DuplicateVehicle(index)),
        1 => roster.apply(RosterAction::RemoveVehicle(index)),
        2 => {
            let kind = weapons[rng.gen_range(0..weapons.len())];
            roster.update_vehicle(index, |v| v.with_weapon(kind))
        }
        3 => roster.update_vehicle(index, |v| {
            let w = rng.gen_range(0..v.weapons.len() + 1);
            let expected = can_remove_weapon(v, w);
            let next = v.without_weapon(w);
            debug_assert_eq!(expected, next.weapons.len() < v.weapons.len());
            next
        }),
        4 => roster.update_vehicle(index, |v| {
            let w = rng.gen_range(0..v.weapons.len());
            let next = v.with_cycled_facing(w);
            debug_assert_eq!(can_cycle_facing(v, w), next != *v);
            next
        }),
        5 | 6 => {
            let kind = upgrades[rng.gen_range(0..upgrades.len())];
            roster.update_vehicle(index, |v| v.with_upgrade(kind))
        }
        7 => {
            let kind = upgrades[rng.gen_range(0..upgrades.len())];
            roster.update_vehicle(index, |v| v.with_upgrade_decremented(kind))
        }
        _ => {
            let kind = upgrades[rng.gen_range(0..upgrades.len())];
            roster.update_vehicle(index, |v| v.without_upgrade(kind))
        }
    }
}

fn validate_random_sweep(opts: &Options) -> Vec<TestResult> {
    println!("--- Random Sweep (seed {}) ---", opts.seed);
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(opts.seed);

    let mut roster = Roster::default();
    let mut violations = Vec::new();
    let mut snapshots = Vec::new();
    let mut peak_vehicles = 0usize;

    for step in 0..opts.steps {
        if step % SNAPSHOT_EVERY == 0 {
            snapshots.push(Snapshot::take(step, &roster));
        }
        let next = random_edit(&mut rng, &roster);

        for v in next.vehicles() {
            for msg in vehicle_violations(v) {
                violations.push(format!("step {step}: {msg}"));
            }
        }
        // Keep the roster from growing without bound.
        roster = if next.len() > 12 {
            next.remove_vehicle(0)
        } else {
            next
        };
        peak_vehicles = peak_vehicles.max(roster.len());
    }

    // Every later edit has run; the kept values must still derive the same.
    let stale: Vec<usize> = snapshots
        .iter()
        .filter(|s| s.is_stale())
        .map(|s| s.step)
        .collect();

    results.push(TestResult {
        name: "sweep_invariants".into(),
        passed: violations.is_empty(),
        detail: if violations.is_empty() {
            format!("{} edits, peak {} vehicles", opts.steps, peak_vehicles)
        } else {
            format!(
                "{} violations, first: {}",
                violations.len(),
                violations[0]
            )
        },
    });

    results.push(TestResult {
        name: "sweep_snapshots_immutable".into(),
        passed: stale.is_empty(),
        detail: format!(
            "{} of {} snapshots changed by later edits (steps {:?})",
            stale.len(),
            snapshots.len(),
            stale
        ),
    });

    if opts.verbose {
        for (i, v) in roster.vehicles().iter().enumerate() {
            let s = summarize(v);
            println!(
                "    #{i} {:16} {:>3} cans  slots {}/{}  hull {}  weapons {}  upgrades {}",
                v.kind.spec().name,
                s.cost,
                s.build_slots_in_use,
                s.build_slot_capacity,
                s.hull,
                s.weapon_count,
                s.upgrade_count
            );
        }
    }

    results
}

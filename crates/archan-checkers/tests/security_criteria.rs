//! Integration test: every built-in checker against one layered project DSM.
//!
//! ```text
//!                 dj rq ut mo or bi bu
//! django        F  .  .  .  .  .  .  .
//! requests      C  .  .  .  .  .  .  .
//! utils         L  1  1  .  .  .  .  .
//! models        D  1  .  .  .  .  .  .
//! shop.orders   M  1  .  1  1  .  1  1
//! shop.billing  M  1  .  .  1  .  .  1
//! bus           B  1  .  .  .  1  1  .
//! ```

use archan_checkers::all_checkers;
use archan_core::{
    Arguments, Category, CheckError, Data, DesignStructureMatrix, DomainMappingMatrix, Registry,
    Status,
};

fn project() -> DesignStructureMatrix {
    let entities = [
        ("django", Category::Framework),
        ("requests", Category::CoreLib),
        ("utils", Category::AppLib),
        ("models", Category::Data),
        ("shop.orders", Category::AppModule),
        ("shop.billing", Category::AppModule),
        ("bus", Category::Broker),
    ];
    DesignStructureMatrix::new(
        entities.iter().map(|(e, _)| (*e).to_string()).collect(),
        Some(entities.iter().map(|(_, c)| *c).collect()),
        vec![
            vec![0, 0, 0, 0, 0, 0, 0],
            vec![0, 0, 0, 0, 0, 0, 0],
            vec![1, 1, 0, 0, 0, 0, 0],
            vec![1, 0, 0, 0, 0, 0, 0],
            vec![1, 0, 1, 1, 0, 1, 1],
            vec![1, 0, 0, 1, 0, 0, 1],
            vec![1, 0, 0, 0, 1, 1, 0],
        ],
    )
    .unwrap()
}

fn registry() -> Registry {
    Registry::new().checkers(all_checkers())
}

fn status_of(codename: &str, data: &Data, args: &Arguments) -> Status {
    registry()
        .find_checker(codename)
        .unwrap()
        .check(data, args)
        .unwrap()
        .status
}

// ── Default arguments ──

#[test]
fn statuses_with_default_arguments() {
    let data = Data::from(project());
    let registry = registry();

    let statuses: Vec<(&str, Status)> = registry
        .all_checkers()
        .map(|c| (c.codename(), c.check(&data, &Arguments::new()).unwrap().status))
        .collect();

    assert_eq!(
        statuses,
        vec![
            ("CM", Status::Passed),
            ("EOM", Status::Passed),
            ("SOP", Status::NotImplemented),
            ("LP", Status::NotImplemented),
            ("LCM", Status::Failed),
            ("LA", Status::Passed),
            ("OD", Status::NotImplemented),
            ("CC", Status::NotImplemented),
        ]
    );
}

#[test]
fn least_common_mechanism_names_first_most_shared_entity() {
    let outcome = registry()
        .find_checker("LCM")
        .unwrap()
        .check(&project().into(), &Arguments::new())
        .unwrap();
    assert_eq!(
        outcome.messages,
        ["  Dependencies to models (2) > matrix size (7) / independence factor (5) = 1.4"]
    );
}

// ── Factors ──

#[test]
fn factors_change_the_verdict() {
    let data = Data::from(project());
    assert_eq!(
        status_of("LCM", &data, &Arguments::new().with("independence_factor", 2u64)),
        Status::Passed
    );
    assert_eq!(
        status_of("EOM", &data, &Arguments::new().with("simplicity_factor", 1u64)),
        Status::Failed
    );
}

#[test]
fn zero_factor_is_an_argument_error() {
    let err = registry()
        .find_checker("archan.EconomyOfMechanism")
        .unwrap()
        .check(&project().into(), &Arguments::new().with("simplicity_factor", 0u64))
        .unwrap_err();
    assert!(matches!(err, CheckError::Argument(_)), "{err}");
}

// ── Violations ──

#[test]
fn direct_dependency_between_modules_breaks_mediation_and_layers() {
    let mut rows = project().data().to_vec();
    // models -> shop.orders: data may only use the framework, and it is
    // an upward dependency
    rows[3][4] = 2;
    let dsm = DesignStructureMatrix::new(
        project().entities().to_vec(),
        project().categories().map(<[Category]>::to_vec),
        rows,
    )
    .unwrap();
    let data = Data::from(dsm);

    let cm = registry()
        .find_checker("CM")
        .unwrap()
        .check(&data, &Arguments::new())
        .unwrap();
    assert_eq!(cm.status, Status::Failed);
    assert_eq!(
        cm.messages,
        ["  Untolerated dependency at 3:4 (models:shop.orders): 2 instead of 0"]
    );
    assert_eq!(status_of("LA", &data, &Arguments::new()), Status::Failed);
}

// ── Data kinds ──

#[test]
fn uncategorized_dsm_is_rejected_by_category_checkers() {
    let dsm = DesignStructureMatrix::new(
        vec!["a".into(), "b".into()],
        None,
        vec![vec![0, 0], vec![1, 0]],
    )
    .unwrap();
    let data = Data::from(dsm);
    let registry = registry();
    let cm = registry.find_checker("CM").unwrap();
    assert!(matches!(
        cm.check(&data, &Arguments::new()),
        Err(CheckError::MissingCategories)
    ));
    assert_eq!(status_of("LA", &data, &Arguments::new()), Status::Passed);
}

#[test]
fn checkers_only_accept_dsms() {
    let dmm = DomainMappingMatrix::new(vec!["a".into()], vec!["x".into()], vec![vec![1]]).unwrap();
    let data = Data::from(dmm);
    assert!(registry().all_checkers().all(|c| !c.accepts(&data)));
}

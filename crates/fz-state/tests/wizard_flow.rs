//! Integration test: zone selection wizard sessions end to end, from
//! catalog load through confirmation, against the built-in catalog.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use fz_catalog::{BuiltinCatalogSource, CatalogSource};
use fz_core::{CatalogLoadError, ZoneCode};
use fz_state::{WizardConfig, WizardError, WizardState, ZoneSelectionWizard, ZoneSetup};

fn code(raw: &str) -> ZoneCode {
    ZoneCode::new(raw).unwrap()
}

type Sink = Rc<RefCell<Vec<ZoneSetup<String>>>>;

fn wizard_with_sink(initial: &[&str]) -> (ZoneSelectionWizard, Sink) {
    let sink: Sink = Rc::new(RefCell::new(Vec::new()));
    let recorder = Rc::clone(&sink);
    let wizard = ZoneSelectionWizard::new(
        WizardConfig {
            initial_selected_zones: initial.iter().map(|s| s.to_string()).collect(),
            blank_cell_value: String::new(),
        },
        move |setup| recorder.borrow_mut().push(setup),
    );
    (wizard, sink)
}

#[test]
fn test_three_zone_session_produces_nine_blank_cells() {
    let (mut wizard, sink) = wizard_with_sink(&[]);
    wizard.mount(&BuiltinCatalogSource).unwrap();

    for zone in ["E1", "NE1", "X1"] {
        wizard.toggle_zone(code(zone)).unwrap();
    }
    assert!(wizard.validation().is_valid);
    assert_eq!(wizard.validation().warnings.len(), 2);

    wizard.preview().unwrap();
    wizard.confirm().unwrap();

    let delivered = sink.borrow();
    assert_eq!(delivered.len(), 1);
    let setup = &delivered[0];
    assert_eq!(setup.price_matrix.cell_count(), 9);
    for from in ["E1", "NE1", "X1"] {
        for to in ["E1", "NE1", "X1"] {
            assert_eq!(
                setup.price_matrix.get(&code(from), &code(to)).map(String::as_str),
                Some("")
            );
        }
    }
    let order: Vec<&str> = setup.zones.iter().map(|z| z.zone_code.as_str()).collect();
    assert_eq!(order, vec!["E1", "NE1", "X1"]);
}

#[test]
fn test_empty_selection_never_reaches_the_callback() {
    let (mut wizard, sink) = wizard_with_sink(&["ZZ9"]);
    wizard.mount(&BuiltinCatalogSource).unwrap();
    assert!(wizard.selection().is_empty());

    assert_eq!(wizard.preview().unwrap_err(), WizardError::EmptySelection);
    assert!(wizard.confirm().is_err());

    wizard.select_region("Metro").unwrap();
    wizard.clear_region("Metro").unwrap();
    assert!(wizard.preview().is_err());
    assert!(sink.borrow().is_empty());
}

#[test]
fn test_back_and_forth_before_confirming() {
    let (mut wizard, sink) = wizard_with_sink(&["W1"]);
    wizard.mount(&BuiltinCatalogSource).unwrap();

    wizard.preview().unwrap();
    wizard.back_to_selecting().unwrap();
    wizard.select_region("South").unwrap();
    let preview_len = wizard.preview().unwrap().len();
    assert_eq!(preview_len, 3);
    wizard.confirm().unwrap();

    assert_eq!(sink.borrow()[0].price_matrix.cell_count(), 9);
    let states: Vec<WizardState> = wizard.transitions().iter().map(|t| t.to_state).collect();
    assert_eq!(
        states,
        vec![
            WizardState::Selecting,
            WizardState::Previewing,
            WizardState::Selecting,
            WizardState::Previewing,
            WizardState::Confirmed,
        ]
    );
}

#[test]
fn test_async_host_completes_load_once() {
    let (mut wizard, _sink) = wizard_with_sink(&["NE1", "X1"]);

    let ticket = wizard.begin_load().expect("first claim succeeds");
    assert!(wizard.begin_load().is_none());
    let catalog = Arc::new(BuiltinCatalogSource.load().unwrap());
    wizard.complete_load(ticket, Ok(Arc::clone(&catalog))).unwrap();

    assert_eq!(wizard.state(), WizardState::Selecting);
    assert!(Arc::ptr_eq(wizard.catalog().unwrap(), &catalog));
    assert!(wizard.validation().warnings.is_empty());
}

#[test]
fn test_failed_load_ends_the_session() {
    let (mut wizard, sink) = wizard_with_sink(&["E1"]);
    let ticket = wizard.begin_load().unwrap();
    let failure = CatalogLoadError::Unreachable {
        origin: "https://zones.example/catalog.yaml".into(),
        reason: "connection refused".into(),
    };
    let err = wizard
        .complete_load::<Arc<fz_catalog::GeographyCatalog>>(ticket, Err(failure.clone()))
        .unwrap_err();

    assert_eq!(err, WizardError::CatalogLoad(failure.clone()));
    assert_eq!(wizard.state(), WizardState::Error);
    assert_eq!(wizard.load_error(), Some(&failure));
    assert!(wizard.begin_load().is_none());
    assert!(matches!(wizard.preview(), Err(WizardError::TerminalState { .. })));
    assert!(sink.borrow().is_empty());
}

#[test]
fn test_outbound_document_shape() {
    let (mut wizard, _sink) = wizard_with_sink(&["NE1"]);
    wizard.mount(&BuiltinCatalogSource).unwrap();
    wizard.preview().unwrap();
    let setup = wizard.confirm().unwrap();

    let json = serde_json::to_value(&setup).unwrap();
    assert_eq!(json["zones"][0]["zoneCode"], "NE1");
    assert_eq!(json["zones"][0]["selectedCities"][0], "Guwahati||Assam");
    assert_eq!(json["priceMatrix"]["NE1"]["NE1"], "");
}

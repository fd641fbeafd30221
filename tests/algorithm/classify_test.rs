use cohort_engine::algorithm::classify::{
    CategoryTable, Classifiers, DiagnosisGroup, MatchMode, MedicationClass, diagnosis_table,
    medication_table,
};

#[test]
fn test_single_class_names() {
    let table = medication_table();
    let cases = [
        ("Lantus Solostar 100 unit/mL", MedicationClass::Insulin),
        ("OZEMPIC 1 MG/DOSE PEN", MedicationClass::Glp1),
        ("metformin ER 500 mg", MedicationClass::Metformin),
        ("Crestor 10mg", MedicationClass::Statin),
        ("sertraline 50 mg", MedicationClass::Ssri),
        ("Cymbalta 60 mg", MedicationClass::Snri),
        ("lisinopril 20 mg", MedicationClass::AceInhibitor),
        ("losartan potassium 50 mg", MedicationClass::Arb),
        ("amlodipine besylate 5 mg", MedicationClass::DhpCcb),
        ("diltiazem ER 120 mg", MedicationClass::NonDhpCcb),
        ("hydrochlorothiazide 25 mg", MedicationClass::Thiazide),
        ("metoprolol succinate 25 mg", MedicationClass::BetaBlocker),
        ("Protonix 40 mg", MedicationClass::Ppi),
        ("ibuprofen 800 mg", MedicationClass::Nsaid),
        ("alprazolam 0.5 mg", MedicationClass::Benzodiazepine),
        ("oxycodone HCl 5 mg", MedicationClass::Opioid),
        ("Adderall XR 20 mg", MedicationClass::Stimulant),
        ("bupropion XL 150 mg", MedicationClass::AtypicalAntidepressant),
        ("quetiapine 25 mg", MedicationClass::AtypicalAntipsychotic),
        ("Haldol 5 mg", MedicationClass::TypicalAntipsychotic),
    ];
    assert_eq!(cases.len(), MedicationClass::all_classes().len());
    for (name, expected) in cases {
        assert_eq!(table.classify(name), Some(expected), "{name}");
    }
}

#[test]
fn test_earlier_declared_class_wins() {
    let table = medication_table();
    // insulin is declared before metformin
    assert_eq!(
        table.classify("insulin glargine + metformin"),
        Some(MedicationClass::Insulin)
    );
    assert_eq!(table.classify("Janumet 50-1000"), Some(MedicationClass::Metformin));
}

#[test]
fn test_unclassified_terms() {
    let table = medication_table();
    assert_eq!(table.classify("vitamin D3 1000 IU"), None);
    assert_eq!(table.classify("   "), None);
    assert_eq!(table.classify(""), None);
}

#[test]
fn test_diagnosis_prefixes() {
    let table = diagnosis_table();
    for code in ["E08.00", "E09.9", "E10.65", " e11.9 ", "E13"] {
        assert_eq!(table.classify(code), Some(DiagnosisGroup::Diabetes), "{code}");
    }
    for code in ["E12.1", "I10", "Z79.4", "XE11"] {
        assert_eq!(table.classify(code), None, "{code}");
    }
}

#[test]
fn test_match_modes_on_custom_table() {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Group {
        Cardiac,
        Renal,
    }

    let substring = CategoryTable::new(MatchMode::Substring)
        .with_category(Group::Cardiac, &["I50"])
        .with_category(Group::Renal, &["N18"]);
    let prefix = CategoryTable::new(MatchMode::Prefix)
        .with_category(Group::Cardiac, &["I50"])
        .with_category(Group::Renal, &["N18"]);

    assert_eq!(substring.classify("dx: i50.9"), Some(Group::Cardiac));
    assert_eq!(prefix.classify("dx: i50.9"), None);
    assert_eq!(prefix.classify("N18.3"), Some(Group::Renal));
}

#[test]
fn test_classifiers_bundle_default_tables() {
    let classifiers = Classifiers::default();
    assert_eq!(classifiers.medications.len(), 20);
    assert_eq!(classifiers.medications.mode(), MatchMode::Substring);
    assert_eq!(classifiers.diagnoses.mode(), MatchMode::Prefix);

    let term = classifiers.medications.classify_term("Trulicity 1.5 mg");
    assert_eq!(term.category, Some(MedicationClass::Glp1));
    assert_eq!(term.text, "Trulicity 1.5 mg");
}

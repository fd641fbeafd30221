//! Drug classes for medication-name classification
//!
//! The table order below is the conflict-resolution rule: a medication name
//! that mentions terms from several classes (for example a combination product
//! such as `esomeprazole/naproxen`) is assigned the class declared first.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{CategoryTable, MatchMode};

/// Drug classes assigned to medication records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MedicationClass {
    /// Insulins (rapid, short, intermediate, long acting and premixed)
    Insulin,
    /// GLP-1 receptor agonists (and the dual GIP/GLP-1 agonist tirzepatide)
    Glp1,
    /// Metformin, including combination products
    Metformin,
    /// HMG-CoA reductase inhibitors
    Statin,
    /// Selective serotonin reuptake inhibitors
    Ssri,
    /// Serotonin-norepinephrine reuptake inhibitors
    Snri,
    /// Benzodiazepines
    Benzodiazepine,
    /// Opioid analgesics
    Opioid,
    /// Thiazide and thiazide-like diuretics
    Thiazide,
    /// Non-dihydropyridine calcium channel blockers
    NonDhpCcb,
    /// Dihydropyridine calcium channel blockers
    DhpCcb,
    /// ACE inhibitors
    AceInhibitor,
    /// Angiotensin II receptor blockers
    Arb,
    /// Beta blockers
    BetaBlocker,
    /// Stimulants and wakefulness agents
    Stimulant,
    /// Atypical antidepressants
    AtypicalAntidepressant,
    /// Second generation antipsychotics
    AtypicalAntipsychotic,
    /// First generation antipsychotics
    TypicalAntipsychotic,
    /// Proton pump inhibitors
    Ppi,
    /// Non-steroidal anti-inflammatory drugs
    Nsaid,
}

impl MedicationClass {
    /// Get the report label for this class
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Insulin => "Insulin",
            Self::Glp1 => "GLP1",
            Self::Metformin => "Metformin",
            Self::Statin => "Statin",
            Self::Ssri => "SSRI",
            Self::Snri => "SNRI",
            Self::Benzodiazepine => "Benzodiazepine",
            Self::Opioid => "Opioid",
            Self::Thiazide => "Thiazide",
            Self::NonDhpCcb => "Non-DHP-CCB",
            Self::DhpCcb => "DHP-CCB",
            Self::AceInhibitor => "ACE-inhibitor",
            Self::Arb => "ARB",
            Self::BetaBlocker => "BetaBlocker",
            Self::Stimulant => "Stimulant",
            Self::AtypicalAntidepressant => "Atypical-Antidepressant",
            Self::AtypicalAntipsychotic => "Atypical-Antipsychotic",
            Self::TypicalAntipsychotic => "Typical-Antipsychotic",
            Self::Ppi => "PPI",
            Self::Nsaid => "NSAID",
        }
    }

    /// All classes in table order
    #[must_use]
    pub fn all_classes() -> Vec<Self> {
        vec![
            Self::Insulin,
            Self::Glp1,
            Self::Metformin,
            Self::Statin,
            Self::Ssri,
            Self::Snri,
            Self::Benzodiazepine,
            Self::Opioid,
            Self::Thiazide,
            Self::NonDhpCcb,
            Self::DhpCcb,
            Self::AceInhibitor,
            Self::Arb,
            Self::BetaBlocker,
            Self::Stimulant,
            Self::AtypicalAntidepressant,
            Self::AtypicalAntipsychotic,
            Self::TypicalAntipsychotic,
            Self::Ppi,
            Self::Nsaid,
        ]
    }

    /// Generic and brand names that identify this class
    #[must_use]
    pub const fn alternatives(self) -> &'static [&'static str] {
        match self {
            Self::Insulin => &[
                "insulin", "insulin aspart", "NovoLog", "Fiasp",
                "insulin lispro", "Humalog", "Admelog",
                "insulin glulisine", "Apidra",
                "regular insulin", "Humulin R", "Novolin R",
                "NPH insulin", "Humulin N", "Novolin N",
                "insulin detemir", "Levemir",
                "insulin glargine", "Lantus", "Toujeo", "Basaglar", "Semglee",
                "insulin degludec", "Tresiba",
                "insulin isophane/regular", "Humulin 70/30", "Novolin 70/30",
                "insulin lispro protamine/lispro", "Humalog Mix 75/25", "Humalog Mix 50/50",
                "insulin aspart protamine/aspart", "NovoLog Mix 70/30",
                "insulin inhalation", "Afrezza",
            ],
            Self::Glp1 => &[
                "ozempic", "rebylsus", "wegovy", "semaglutide",
                "mounjaro", "zepbound", "tirzepatide",
                "trulicity", "dulaglutide",
                "victoza", "saxenda", "liraglutide",
                "byetta", "bydureon", "exenatide",
                "adlyxin", "lixisenatide",
            ],
            Self::Metformin => &[
                "janumet", "glucophage", "kombiglyze", "jentadueto", "glucovance", "metformin",
            ],
            Self::Statin => &[
                "atorvastatin", "Lipitor",
                "fluvastatin", "Lescol",
                "fluvastatin extended-release", "Lescol XL",
                "lovastatin", "Mevacor", "Altoprev",
                "pitavastatin", "Livalo", "Zypitamag",
                "pravastatin", "Pravachol",
                "rosuvastatin", "Crestor", "Ezallor Sprinkle",
                "simvastatin", "Zocor",
            ],
            Self::Ssri => &[
                "fluoxetine", "Prozac", "Sarafem",
                "sertraline", "Zoloft",
                "citalopram", "Celexa",
                "escitalopram", "Lexapro",
                "paroxetine", "Paxil", "Paxil CR", "Brisdelle",
                "fluvoxamine", "Luvox", "Luvox CR",
                "vilazodone", "Viibryd",
                "vortioxetine", "Trintellix",
            ],
            Self::Snri => &[
                "venlafaxine", "Effexor",
                "venlafaxine extended-release", "Effexor XR",
                "desvenlafaxine", "Pristiq", "Khedezla",
                "duloxetine", "Cymbalta",
                "levomilnacipran", "Fetzima",
                "milnacipran", "Savella",
            ],
            Self::Benzodiazepine => &[
                "alprazolam", "Xanax",
                "alprazolam extended-release", "Xanax XR",
                "clonazepam", "Klonopin",
                "diazepam", "Valium",
                "lorazepam", "Ativan",
                "chlordiazepoxide", "Librium",
                "oxazepam", "Serax",
                "temazepam", "Restoril",
                "triazolam", "Halcion",
                "midazolam", "Versed",
                "flurazepam", "Dalmane",
                "estazolam", "Prosom",
                "clobazam", "Onfi",
                "clorazepate", "Tranxene",
            ],
            Self::Opioid => &[
                "morphine", "MS Contin", "Roxanol", "Kadian",
                "codeine", "Tylenol with Codeine",
                "hydrocodone", "Vicodin", "Norco", "Lortab",
                "oxycodone", "OxyContin", "Roxicodone", "Percocet", "Percodan",
                "fentanyl", "Duragesic", "Actiq", "Sublimaze",
                "hydromorphone", "Dilaudid", "Exalgo",
                "methadone", "Dolophine",
                "meperidine", "Demerol",
                "buprenorphine", "Subutex", "Belbuca",
                "buprenorphine/naloxone", "Suboxone",
                "tramadol", "Ultram", "Ultracet",
                "tapentadol", "Nucynta",
            ],
            Self::Thiazide => &[
                "hydrochlorothiazide", "Microzide",
                "chlorthalidone", "Hygroton",
                "chlorothiazide", "Diuril",
                "indapamide", "Lozol",
                "metolazone", "Zaroxolyn",
                "bendroflumethiazide", "Naturetin",
                "methyclothiazide", "Enduron",
            ],
            Self::NonDhpCcb => &[
                "verapamil", "Calan", "Calan SR", "Isoptin", "Isoptin SR", "Verelan", "Verelan PM",
                "diltiazem", "Cardizem", "Cardizem CD", "Cardizem LA", "Cartia XT", "Dilacor XR",
                "Tiazac", "Taztia XT",
            ],
            Self::DhpCcb => &[
                "amlodipine", "Norvasc",
                "felodipine", "Plendil",
                "isradipine", "Dynacirc",
                "nicardipine", "Cardene", "Cardene SR",
                "nifedipine", "Adalat CC", "Procardia", "Procardia XL",
                "nisoldipine", "Sular",
                "clevidipine", "Cleviprex",
            ],
            Self::AceInhibitor => &[
                "benazepril", "Lotensin",
                "captopril", "Capoten",
                "enalapril", "Vasotec", "Epaned",
                "fosinopril", "Monopril",
                "lisinopril", "Prinivil", "Zestril", "Qbrelis",
                "moexipril", "Univasc",
                "perindopril", "Aceon",
                "quinapril", "Accupril",
                "ramipril", "Altace",
                "trandolapril", "Mavik",
            ],
            Self::Arb => &[
                "azilsartan", "Edarbi",
                "candesartan", "Atacand",
                "eprosartan", "Teveten",
                "irbesartan", "Avapro",
                "losartan", "Cozaar",
                "olmesartan", "Benicar",
                "telmisartan", "Micardis",
                "valsartan", "Diovan",
            ],
            Self::BetaBlocker => &[
                "atenolol", "Tenormin",
                "bisoprolol", "Zebeta",
                "carvedilol", "Coreg", "Coreg CR",
                "labetalol", "Trandate", "Normodyne",
                "metoprolol", "Lopressor", "Toprol XL",
                "nadolol", "Corgard",
                "propranolol", "Inderal", "Inderal LA", "Inderal XL", "InnoPran XL",
                "timolol", "Blocadren",
                "acebutolol", "Sectral",
                "betaxolol", "Kerlone",
                "esmolol", "Brevibloc",
                "nebivolol", "Bystolic",
                "pindolol", "Visken",
                "sotalol", "Betapace", "Betapace AF", "Sorine",
            ],
            Self::Stimulant => &[
                "amphetamine/dextroamphetamine", "Adderall", "Adderall XR",
                "dextroamphetamine", "Dexedrine", "Zenzedi", "ProCentra",
                "lisdexamfetamine", "Vyvanse",
                "methylphenidate", "Ritalin", "Ritalin SR", "Ritalin LA", "Concerta", "Daytrana",
                "Quillivant XR", "Quillichew ER",
                "dexmethylphenidate", "Focalin", "Focalin XR",
                "methamphetamine", "Desoxyn",
                "armodafinil", "Nuvigil",
                "modafinil", "Provigil",
                "phentermine", "Adipex-P", "Lomaira",
                "phentermine/topiramate", "Qsymia",
                "benzphetamine", "Didrex",
                "diethylpropion", "Tenuate",
            ],
            Self::AtypicalAntidepressant => &[
                "bupropion", "Wellbutrin", "Wellbutrin SR", "Wellbutrin XL", "Zyban", "Aplenzin",
                "Forfivo XL",
                "mirtazapine", "Remeron", "Remeron SolTab",
                "trazodone", "Desyrel", "Oleptro",
                "nefazodone", "Serzone",
                "vilazodone", "Viibryd",
                "vortioxetine", "Trintellix",
            ],
            Self::AtypicalAntipsychotic => &[
                "aripiprazole", "Abilify", "Abilify Maintena", "Aristada",
                "asenapine", "Saphris", "Secuado",
                "brexpiprazole", "Rexulti",
                "cariprazine", "Vraylar",
                "clozapine", "Clozaril", "Versacloz", "FazaClo",
                "iloperidone", "Fanapt",
                "lurasidone", "Latuda",
                "olanzapine", "Zyprexa", "Zyprexa Zydis", "Zyprexa Relprevv",
                "paliperidone", "Invega", "Invega Sustenna", "Invega Trinza",
                "quetiapine", "Seroquel", "Seroquel XR",
                "risperidone", "Risperdal", "Risperdal Consta", "Perseris",
                "ziprasidone", "Geodon",
            ],
            Self::TypicalAntipsychotic => &[
                "chlorpromazine", "Thorazine",
                "fluphenazine", "Prolixin",
                "haloperidol", "Haldol",
                "loxapine", "Loxitane", "Adasuve",
                "mesoridazine", "Serentil",
                "molindone", "Moban",
                "perphenazine", "Trilafon",
                "pimozide", "Orap",
                "prochlorperazine", "Compazine",
                "thioridazine", "Mellaril",
                "thiothixene", "Navane",
                "trifluoperazine", "Stelazine",
            ],
            Self::Ppi => &[
                "omeprazole", "Prilosec", "Prilosec OTC",
                "esomeprazole", "Nexium", "Nexium 24HR",
                "lansoprazole", "Prevacid", "Prevacid 24HR", "Prevacid SoluTab",
                "dexlansoprazole", "Dexilant",
                "pantoprazole", "Protonix",
                "rabeprazole", "AcipHex",
                "esomeprazole/naproxen", "Vimovo",
            ],
            Self::Nsaid => &[
                "ibuprofen", "Advil", "Motrin",
                "naproxen", "Aleve", "Naprosyn", "Anaprox",
                "celecoxib", "Celebrex",
                "diclofenac", "Voltaren", "Cataflam", "Zorvolex",
                "indomethacin", "Indocin", "Tivorbex",
                "meloxicam", "Mobic", "Vivlodex",
                "piroxicam", "Feldene",
                "ketorolac", "Toradol", "Acular",
                "etodolac", "Lodine",
                "nabumetone", "Relafen",
                "sulindac", "Clinoril",
                "oxaprozin", "Daypro",
                "mefenamic acid", "Ponstel",
                "flurbiprofen", "Ansaid",
                "fenoprofen", "Nalfon",
                "tolmetin", "Tolectin",
            ],
        }
    }
}

impl fmt::Display for MedicationClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Build the default medication table (substring matching, table order as
/// declared by [`MedicationClass::all_classes`])
#[must_use]
pub fn medication_table() -> CategoryTable<MedicationClass> {
    MedicationClass::all_classes()
        .into_iter()
        .fold(CategoryTable::new(MatchMode::Substring), |table, class| {
            table.with_category(class, class.alternatives())
        })
}

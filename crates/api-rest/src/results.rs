//! Lab-result generation.
//!
//! Every study panel produces fifteen parameters. Values are drawn within
//! real clinical reference ranges with an 80% probability; the remaining 20%
//! fall below or above the range by up to a fifth of its width (never below
//! zero). Some parameters carry sex-specific ranges.

use clinilab_core::{LabResult, Sex, StudyKind};
use rand::seq::SliceRandom;
use rand::Rng;

/// One entry of a study's parameter table.
enum ParameterSpec {
    Quantitative {
        name: &'static str,
        unit: &'static str,
        /// Reference range; the male range when `female_range` is set.
        range: (f64, f64),
        female_range: Option<(f64, f64)>,
    },
    Qualitative {
        name: &'static str,
        normal: &'static str,
        abnormal: &'static [&'static str],
    },
}

use ParameterSpec::{Qualitative, Quantitative};

const BIOMETRIA_HEMATICA: [ParameterSpec; 15] = [
    Quantitative { name: "Hemoglobina", unit: "g/dL", range: (13.5, 17.5), female_range: Some((12.0, 15.5)) },
    Quantitative { name: "Hematocrito", unit: "%", range: (41.0, 53.0), female_range: Some((36.0, 46.0)) },
    Quantitative { name: "Eritrocitos", unit: "millones/µL", range: (4.5, 5.9), female_range: Some((4.1, 5.1)) },
    Quantitative { name: "Leucocitos", unit: "miles/µL", range: (4.5, 11.0), female_range: None },
    Quantitative { name: "Neutrófilos", unit: "%", range: (40.0, 70.0), female_range: None },
    Quantitative { name: "Linfocitos", unit: "%", range: (20.0, 40.0), female_range: None },
    Quantitative { name: "Monocitos", unit: "%", range: (2.0, 8.0), female_range: None },
    Quantitative { name: "Eosinófilos", unit: "%", range: (1.0, 4.0), female_range: None },
    Quantitative { name: "Basófilos", unit: "%", range: (0.0, 1.0), female_range: None },
    Quantitative { name: "Plaquetas", unit: "miles/µL", range: (150.0, 450.0), female_range: None },
    Quantitative { name: "VCM", unit: "fL", range: (80.0, 100.0), female_range: None },
    Quantitative { name: "HCM", unit: "pg", range: (27.0, 33.0), female_range: None },
    Quantitative { name: "CHCM", unit: "g/dL", range: (32.0, 36.0), female_range: None },
    Quantitative { name: "RDW", unit: "%", range: (11.5, 14.5), female_range: None },
    Quantitative { name: "VSG", unit: "mm/h", range: (0.0, 20.0), female_range: None },
];

const QUIMICA_SANGUINEA: [ParameterSpec; 15] = [
    Quantitative { name: "Glucosa", unit: "mg/dL", range: (70.0, 100.0), female_range: None },
    Quantitative { name: "Urea", unit: "mg/dL", range: (15.0, 45.0), female_range: None },
    Quantitative { name: "Creatinina", unit: "mg/dL", range: (0.7, 1.3), female_range: Some((0.6, 1.1)) },
    Quantitative { name: "Ácido úrico", unit: "mg/dL", range: (3.4, 7.0), female_range: Some((2.4, 6.0)) },
    Quantitative { name: "Colesterol total", unit: "mg/dL", range: (125.0, 200.0), female_range: None },
    Quantitative { name: "Triglicéridos", unit: "mg/dL", range: (50.0, 150.0), female_range: None },
    Quantitative { name: "Colesterol HDL", unit: "mg/dL", range: (40.0, 60.0), female_range: None },
    Quantitative { name: "Colesterol LDL", unit: "mg/dL", range: (50.0, 130.0), female_range: None },
    Quantitative { name: "AST (TGO)", unit: "U/L", range: (10.0, 40.0), female_range: None },
    Quantitative { name: "ALT (TGP)", unit: "U/L", range: (7.0, 56.0), female_range: None },
    Quantitative { name: "Fosfatasa alcalina", unit: "U/L", range: (44.0, 147.0), female_range: None },
    Quantitative { name: "Bilirrubina total", unit: "mg/dL", range: (0.1, 1.2), female_range: None },
    Quantitative { name: "Proteínas totales", unit: "g/dL", range: (6.0, 8.3), female_range: None },
    Quantitative { name: "Albúmina", unit: "g/dL", range: (3.5, 5.0), female_range: None },
    Quantitative { name: "Calcio", unit: "mg/dL", range: (8.5, 10.5), female_range: None },
];

const EXAMEN_ORINA: [ParameterSpec; 15] = [
    Qualitative { name: "Color", normal: "Amarillo claro", abnormal: &["Amarillo oscuro", "Ámbar", "Rojizo"] },
    Qualitative { name: "Aspecto", normal: "Transparente", abnormal: &["Ligeramente turbio", "Turbio"] },
    Qualitative { name: "Olor", normal: "Sui géneris", abnormal: &["Amoniacal", "Fétido"] },
    Quantitative { name: "Densidad", unit: "", range: (1.005, 1.03), female_range: None },
    Quantitative { name: "pH", unit: "", range: (4.5, 8.0), female_range: None },
    Qualitative { name: "Glucosa", normal: "Negativo", abnormal: &["Positivo (+)", "Positivo (++)"] },
    Qualitative { name: "Proteínas", normal: "Negativo", abnormal: &["Trazas", "Positivo (+)"] },
    Qualitative { name: "Cetonas", normal: "Negativo", abnormal: &["Positivo (+)"] },
    Qualitative { name: "Sangre", normal: "Negativo", abnormal: &["Positivo (+)"] },
    Qualitative { name: "Nitritos", normal: "Negativo", abnormal: &["Positivo"] },
    Qualitative { name: "Esterasa leucocitaria", normal: "Negativo", abnormal: &["Positivo (+)"] },
    Qualitative { name: "Urobilinógeno", normal: "Normal", abnormal: &["Aumentado"] },
    Qualitative { name: "Bilirrubina", normal: "Negativo", abnormal: &["Positivo"] },
    Quantitative { name: "Leucocitos", unit: "por campo", range: (0.0, 5.0), female_range: None },
    Quantitative { name: "Eritrocitos", unit: "por campo", range: (0.0, 2.0), female_range: None },
];

fn table_for(kind: StudyKind) -> &'static [ParameterSpec; 15] {
    match kind {
        StudyKind::BiometriaHematica => &BIOMETRIA_HEMATICA,
        StudyKind::QuimicaSanguinea => &QUIMICA_SANGUINEA,
        StudyKind::ExamenOrina => &EXAMEN_ORINA,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Generate the fifteen results for one study order.
pub fn generate_results(kind: StudyKind, sex: Sex) -> Vec<LabResult> {
    let mut rng = rand::thread_rng();

    table_for(kind)
        .iter()
        .map(|spec| match spec {
            Quantitative {
                name,
                unit,
                range,
                female_range,
            } => {
                let (minimum, maximum) = match (sex, female_range) {
                    (Sex::Female, Some(female)) => *female,
                    _ => *range,
                };
                let spread = (maximum - minimum) * 0.2;

                let value = if rng.gen_bool(0.8) {
                    rng.gen_range(minimum..=maximum)
                } else if rng.gen_bool(0.5) {
                    rng.gen_range(f64::max(0.0, minimum - spread)..=minimum)
                } else {
                    rng.gen_range(maximum..=maximum + spread)
                };
                let value = round2(value);

                LabResult::Quantitative {
                    parameter: (*name).to_owned(),
                    value,
                    unit: (*unit).to_owned(),
                    minimum,
                    maximum,
                    normal: (minimum..=maximum).contains(&value),
                }
            }
            Qualitative {
                name,
                normal,
                abnormal,
            } => {
                let (value, is_normal) = if rng.gen_bool(0.8) {
                    ((*normal).to_owned(), true)
                } else {
                    let drawn = abnormal.choose(&mut rng).copied().unwrap_or(*normal);
                    (drawn.to_owned(), drawn != *normal)
                };

                LabResult::Qualitative {
                    parameter: (*name).to_owned(),
                    value,
                    unit: String::new(),
                    expected: Some((*normal).to_owned()),
                    normal: is_normal,
                }
            }
        })
        .collect()
}

//! The measured-parameter catalog.
//!
//! The catalog is external input: it lists the parameter names a report
//! can show, with human-readable descriptions. Settings state is keyed by
//! these names. A store without a catalog file is seeded with the built-in
//! pediatric echo set (Pettersen, Detroit data).

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// One catalog entry. Names are unique in practice but the model does not
/// enforce it; the catalog file is owned by whoever measures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Wire container for the catalog file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub parameters: Vec<CatalogEntry>,
}

fn entry(name: &str, description: &str) -> CatalogEntry {
    CatalogEntry {
        name: name.to_string(),
        description: description.to_string(),
    }
}

/// Built-in catalog used to bootstrap a fresh store. Order matters: it
/// drives the default display order of the settings list.
pub static DEFAULT_CATALOG: Lazy<Vec<CatalogEntry>> = Lazy::new(|| {
    vec![
        entry("MVAP", "Mitral valve annulus (AP)"),
        entry("MVLAT", "Mitral valve annulus (LAT)"),
        entry("MVA", "Mitral valve area"),
        entry("TVAP", "Tricuspid valve annulus (AP)"),
        entry("TVLAT", "Tricuspid valve annulus (LAT)"),
        entry("TVA", "Tricuspid valve area"),
        entry("ANN", "Aortic annulus"),
        entry("ROOT", "Aortic root"),
        entry("STJ", "Sinotubular junction"),
        entry("AAO", "Ascending aorta"),
        entry("ARCHPROX", "Aortic arch proximal"),
        entry("ARCHDIST", "Aortic arch distal"),
        entry("ISTH", "Aortic isthmus"),
        entry("LMCA", "Left main coronary artery"),
        entry("LAD", "Left anterior descending artery"),
        entry("RCA", "Right coronary artery"),
        entry("PVSAX", "Pulmonary valve (SAX)"),
        entry("PVLAX", "Pulmonary valve (LAX)"),
        entry("MPA", "Main pulmonary artery"),
        entry("RPA", "Right pulmonary artery"),
        entry("LPA", "Left pulmonary artery"),
        entry("LVEDD", "LV end-diastolic diameter"),
        entry("LVPWT", "LV posterior wall thickness (diastole)"),
        entry("LVST", "LV septal thickness (diastole)"),
        entry("LVEDL", "LV end-diastolic length"),
        entry("LVEDLEPI", "LV end-diastolic length (epi)"),
        entry("LVEDA", "LV end-diastolic area"),
        entry("LVEDAEPI", "LV end-diastolic area (epi)"),
        entry("LVEDV", "LV end-diastolic volume"),
        entry("LVEDVEPI", "LV end-diastolic volume (epi)"),
        entry("LVM", "LV mass"),
        entry("LVMTV", "LV mass / total volume ratio"),
        entry("LVTTD", "LV thickness / transverse diameter"),
        entry("LVSI", "LV sphericity index"),
    ]
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_is_nonempty_with_unique_names() {
        let mut names: Vec<&str> = DEFAULT_CATALOG.iter().map(|e| e.name.as_str()).collect();
        let total = names.len();
        assert!(total > 20);
        names.sort();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn catalog_file_tolerates_missing_description() {
        let snap: CatalogSnapshot =
            serde_json::from_str(r#"{"parameters": [{"name": "BSA"}]}"#).unwrap();
        assert_eq!(snap.parameters[0].name, "BSA");
        assert_eq!(snap.parameters[0].description, "");
    }
}

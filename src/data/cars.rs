use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CarGroup {
    GT3,
    GT4,
    GTC,
    TCX,
}

impl CarGroup {
    pub const ALL: [CarGroup; 4] = [CarGroup::GT3, CarGroup::GT4, CarGroup::GTC, CarGroup::TCX];

    pub fn cars(self) -> &'static [Car] {
        match self {
            CarGroup::GT3 => GT3,
            CarGroup::GT4 => GT4,
            CarGroup::GTC => GTC,
            CarGroup::TCX => TCX,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CarGroup::GT3 => "GT3",
            CarGroup::GT4 => "GT4",
            CarGroup::GTC => "GTC",
            CarGroup::TCX => "TCX",
        }
    }
}

impl fmt::Display for CarGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CarGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CarGroup::ALL
            .into_iter()
            .find(|g| g.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown car group '{s}' (expected GT3, GT4, GTC or TCX)"))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Car {
    pub key: &'static str,
    /// `carModel` id used in entry lists and `bop.json`.
    pub id: u32,
    pub name: &'static str,
    pub short_name: &'static str,
    pub competitive: bool,
}

macro_rules! car {
    ($key:literal, $id:literal, $name:literal, $short:literal, $competitive:literal) => {
        Car {
            key: $key,
            id: $id,
            name: $name,
            short_name: $short,
            competitive: $competitive,
        }
    };
}

pub const GT3: &[Car] = &[
    car!("porsche_991_gt3_r", 0, "Porsche 991 GT3 R", "991 GT3 R", false),
    car!("mercedes_amg_gt3", 1, "Mercedes-AMG GT3", "AMG GT3", false),
    car!("ferrari_488_gt3", 2, "Ferrari 488 GT3", "488 GT3", false),
    car!("audi_r8_lms", 3, "Audi R8 LMS", "R8 LMS", false),
    car!("lamborghini_huracan_gt3", 4, "Lamborghini Huracán GT3", "Huracán GT3", false),
    car!("mclaren_650s_gt3", 5, "McLaren 650S GT3", "650S GT3", false),
    car!("nissan_gt_r_gt3_2018", 6, "Nissan GT-R Nismo GT3 2018", "GT-R 2018", false),
    car!("bmw_m6_gt3", 7, "BMW M6 GT3", "M6 GT3", false),
    car!("bentley_continental_gt3_2018", 8, "Bentley Continental GT3 2018", "Continental 2018", false),
    car!("nissan_gt_r_gt3_2017", 10, "Nissan GT-R Nismo GT3 2017", "GT-R 2017", false),
    car!("bentley_continental_gt3_2016", 11, "Bentley Continental GT3 2016", "Continental 2016", false),
    car!("amr_v12_vantage_gt3", 12, "Aston Martin V12 Vantage GT3", "V12 Vantage", false),
    car!("lamborghini_gallardo_rex", 13, "Reiter Engineering R-EX GT3", "R-EX", false),
    car!("jaguar_g3", 14, "Emil Frey Jaguar G3", "Jaguar G3", false),
    car!("lexus_rc_f_gt3", 15, "Lexus RC F GT3", "RC F GT3", false),
    car!("lamborghini_huracan_gt3_evo", 16, "Lamborghini Huracán GT3 Evo", "Huracán Evo", false),
    car!("honda_nsx_gt3", 17, "Honda NSX GT3", "NSX GT3", false),
    car!("audi_r8_lms_evo", 19, "Audi R8 LMS Evo", "R8 Evo", false),
    car!("amr_v8_vantage_gt3", 20, "Aston Martin V8 Vantage GT3", "V8 Vantage", true),
    car!("honda_nsx_gt3_evo", 21, "Honda NSX GT3 Evo", "NSX Evo", true),
    car!("mclaren_720s_gt3", 22, "McLaren 720S GT3", "720S GT3", false),
    car!("porsche_991ii_gt3_r", 23, "Porsche 991 II GT3 R", "991 II GT3 R", false),
    car!("ferrari_488_gt3_evo", 24, "Ferrari 488 GT3 Evo", "488 Evo", false),
    car!("mercedes_amg_gt3_evo", 25, "Mercedes-AMG GT3 Evo", "AMG GT3 Evo", true),
    car!("bmw_m4_gt3", 30, "BMW M4 GT3", "M4 GT3", true),
    car!("audi_r8_lms_evo_ii", 31, "Audi R8 LMS GT3 Evo II", "R8 Evo II", true),
    car!("ferrari_296_gt3", 32, "Ferrari 296 GT3", "296 GT3", true),
    car!("lamborghini_huracan_gt3_evo2", 33, "Lamborghini Huracán GT3 EVO2", "Huracán EVO2", true),
    car!("porsche_992_gt3_r", 34, "Porsche 992 GT3 R", "992 GT3 R", true),
    car!("mclaren_720s_gt3_evo", 35, "McLaren 720S GT3 Evo", "720S Evo", true),
    car!("ford_mustang_gt3", 36, "Ford Mustang GT3", "Mustang GT3", true),
];

pub const GT4: &[Car] = &[
    car!("alpine_a110_gt4", 50, "Alpine A110 GT4", "A110 GT4", true),
    car!("amr_v8_vantage_gt4", 51, "Aston Martin Vantage GT4", "Vantage GT4", true),
    car!("audi_r8_gt4", 52, "Audi R8 LMS GT4", "R8 GT4", true),
    car!("bmw_m4_gt4", 53, "BMW M4 GT4", "M4 GT4", true),
    car!("chevrolet_camaro_gt4r", 55, "Chevrolet Camaro GT4.R", "Camaro GT4", false),
    car!("ginetta_g55_gt4", 56, "Ginetta G55 GT4", "G55 GT4", false),
    car!("ktm_xbow_gt4", 57, "KTM X-Bow GT4", "X-Bow GT4", false),
    car!("maserati_mc_gt4", 58, "Maserati MC GT4", "MC GT4", false),
    car!("mclaren_570s_gt4", 59, "McLaren 570S GT4", "570S GT4", true),
    car!("mercedes_amg_gt4", 60, "Mercedes-AMG GT4", "AMG GT4", true),
    car!("porsche_718_cayman_gt4_mr", 61, "Porsche 718 Cayman GT4 Clubsport", "718 Cayman GT4", true),
];

pub const GTC: &[Car] = &[
    car!("porsche_991ii_gt3_cup", 9, "Porsche 991 II GT3 Cup", "991 II Cup", false),
    car!("lamborghini_huracan_st", 18, "Lamborghini Huracán Super Trofeo", "Huracán ST", false),
    car!("ferrari_488_challenge_evo", 26, "Ferrari 488 Challenge Evo", "488 Challenge", true),
    car!("porsche_992_gt3_cup", 28, "Porsche 992 GT3 Cup", "992 Cup", true),
    car!("lamborghini_huracan_st_evo2", 29, "Lamborghini Huracán Super Trofeo EVO2", "Huracán ST EVO2", true),
];

pub const TCX: &[Car] = &[car!("bmw_m2_cs_racing", 27, "BMW M2 CS Racing", "M2 CS", true)];

fn all_cars() -> impl Iterator<Item = (CarGroup, &'static Car)> {
    CarGroup::ALL
        .into_iter()
        .flat_map(|group| group.cars().iter().map(move |car| (group, car)))
}

pub fn get_car_by_id(id: u32) -> Option<(CarGroup, &'static Car)> {
    all_cars().find(|(_, car)| car.id == id)
}

pub fn get_car_by_key(key: &str) -> Option<(CarGroup, &'static Car)> {
    all_cars().find(|(_, car)| car.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_find_group() {
        assert_eq!(get_car_by_id(32).unwrap().1.key, "ferrari_296_gt3");
        assert_eq!(get_car_by_key("bmw_m2_cs_racing").unwrap().0, CarGroup::TCX);
        assert!(get_car_by_id(999).is_none());
        assert!(get_car_by_key("trabant").is_none());
    }

    #[test]
    fn ids_and_keys_are_unique() {
        let cars: Vec<_> = all_cars().map(|(_, c)| c).collect();
        for (i, a) in cars.iter().enumerate() {
            for b in &cars[i + 1..] {
                assert_ne!(a.id, b.id);
                assert_ne!(a.key, b.key);
            }
        }
    }

    #[test]
    fn group_parses_case_insensitively() {
        assert_eq!("gt4".parse::<CarGroup>().unwrap(), CarGroup::GT4);
        assert!("GT2".parse::<CarGroup>().is_err());
    }
}

//! The 1989 starting position: founding country figures, the opening
//! diplomatic table, and the aid and treaty commitments already in place.

use crate::simulation::PolicyKind;

/// Founding figures for one country. Money is in the raw dataset units and
/// halved when the world is built.
#[derive(Debug, Clone, Copy)]
pub struct CountrySeed {
    pub id: u8,
    pub name: &'static str,
    pub gnp: i64,
    pub population: i64,
    pub military_spending: i64,
    pub government_wing: i64,
    pub insurgency_wing: i64,
    pub government_growth: i64,
    pub population_growth: i64,
    pub government_stability: i64,
    pub investment_fraction: i64,
    pub military_men: i64,
    pub dont_mess: i64,
    pub deaths: i64,
}

#[allow(clippy::too_many_arguments)]
const fn seed(
    id: u8,
    name: &'static str,
    gnp: i64,
    population: i64,
    military_spending: i64,
    government_wing: i64,
    insurgency_wing: i64,
    government_growth: i64,
    population_growth: i64,
    government_stability: i64,
    investment_fraction: i64,
    military_men: i64,
    dont_mess: i64,
    deaths: i64,
) -> CountrySeed {
    CountrySeed {
        id,
        name,
        gnp,
        population,
        military_spending,
        government_wing,
        insurgency_wing,
        government_growth,
        population_growth,
        government_stability,
        investment_fraction,
        military_men,
        dont_mess,
        deaths,
    }
}

// id, name, gnp, population, military spending, government wing, insurgency wing,
// government growth, population growth, stability, investment fraction,
// military men, don't-mess, deaths
pub const COUNTRY_SEEDS: [CountrySeed; 80] = [
    seed(1, "USA", 21350, 2140, 10665, 10, -125, 25, 14, 9, 46, 2130, 100, 434),
    seed(2, "Soviet Union", 9678, 2550, 13482, -60, 30, 38, 14, 7, 70, 4600, 0, 411),
    seed(3, "Mexico", 919, 592, 40, -30, 90, 32, 33, 8, 56, 95, 90, 781),
    seed(4, "Honduras", 16, 30, 3, 40, -70, 15, 32, 6, 64, 12, 70, 197),
    seed(5, "Nicaragua", 21, 23, 4, -70, 60, 24, 30, 7, 36, 30, 50, 2000),
    seed(6, "Panama", 23, 17, 2, 30, -70, 41, 30, 7, 71, 8, 80, 108),
    seed(7, "Cuba", 123, 95, 80, -80, 30, -5, 20, 6, 70, 120, 10, 4192),
    seed(8, "Argentina", 534, 254, 157, 50, -80, 31, 16, 7, 54, 160, 60, 11343),
    seed(9, "Colombia", 230, 259, 16, 10, -50, 27, 32, 7, 51, 50, 65, 9149),
    seed(10, "Peru", 114, 153, 75, -30, -60, 27, 27, 6, 36, 95, 65, 1061),
    seed(11, "Venezuela", 399, 122, 65, 10, -70, 22, 36, 8, 102, 55, 70, 1735),
    seed(12, "Brazil", 1800, 1097, 174, 20, -60, 43, 29, 7, 56, 455, 60, 200),
    seed(13, "Chile", 158, 103, 41, 70, -60, 13, 21, 6, 24, 110, 70, 748),
    seed(14, "Canada", 2040, 228, 441, -10, -125, 36, 20, 9, 56, 77, 99, 12),
    seed(15, "Greece", 324, 89, 145, -30, 80, 66, 7, 7, 61, 190, 75, 9341),
    seed(16, "Sweden", 873, 83, 293, -30, 110, 31, 7, 9, 59, 70, 70, 6),
    seed(17, "Britain", 3195, 564, 1295, 0, -110, 22, 5, 9, 46, 345, 90, 1463),
    seed(18, "France", 4730, 529, 1659, -20, 100, 42, 10, 9, 54, 575, 70, 164),
    seed(19, "Spain", 1464, 375, 227, 10, -80, 57, 10, 7, 54, 375, 70, 216),
    seed(20, "West Germany", 6316, 617, 1992, 10, -100, 35, 9, 9, 56, 495, 90, 61),
    seed(21, "Romania", 362, 212, 346, -60, 100, 83, 10, 7, 60, 220, 5, 0),
    seed(22, "Italy", 2609, 550, 569, 20, -50, 39, 7, 7, 51, 500, 80, 259),
    seed(23, "East Germany", 950, 171, 526, -60, 40, 32, -3, 8, 70, 220, 0, 140),
    seed(24, "Poland", 1276, 338, 687, -60, 0, 40, 12, 5, 60, 435, 0, 575),
    seed(25, "Czechoslovakia", 716, 148, 405, -60, 60, 27, 7, 7, 60, 210, 0, 101),
    seed(26, "Yugoslavia", 461, 213, 193, -40, 30, 55, 11, 6, 60, 270, 20, 51),
    seed(27, "South Africa", 438, 247, 175, 30, -30, 23, 29, 8, 64, 50, 60, 1707),
    seed(28, "Egypt", 169, 375, 135, 10, -80, 15, 25, 6, 61, 400, 60, 615),
    seed(29, "Tunisia", 60, 57, 10, -30, 50, 41, 20, 6, 74, 20, 60, 3149),
    seed(30, "Morocco", 129, 175, 45, 40, -60, 19, 27, 6, 66, 75, 60, 2297),
    seed(31, "Algeria", 257, 168, 43, -50, 50, 18, 26, 7, 117, 80, 50, 32767),
    seed(32, "Libya", 198, 23, 47, -70, 50, 105, 33, 5, 64, 25, 30, 35),
    seed(33, "Mali", 8, 57, 2, -70, 60, 9, 21, 4, 33, 8, 50, 8),
    seed(34, "Nigeria", 481, 630, 187, 10, -90, 34, 23, 5, 74, 270, 50, 32767),
    seed(35, "Sudan", 59, 183, 23, 20, -90, 1, 29, 4, 51, 50, 50, 4356),
    seed(36, "Ethiopia", 35, 281, 10, -60, 50, 20, 22, 3, 25, 50, 20, 32767),
    seed(37, "Kenya", 52, 132, 8, 20, -100, 34, 32, 6, 61, 9, 50, 14038),
    seed(38, "Zaire", 65, 245, 3, 20, -10, 16, 25, 3, 87, 55, 60, 14118),
    seed(39, "Tanzania", 41, 154, 16, -50, 60, 30, 26, 5, 46, 25, 50, 100),
    seed(40, "Mozambique", 24, 92, 50, -70, 50, 20, 18, 4, 60, 20, 30, 4620),
    seed(41, "Zambia", 27, 50, 7, -70, 50, 20, 28, 3, 62, 16, 40, 1338),
    seed(42, "Angola", 28, 63, 10, -70, 50, 36, 20, 4, 50, 30, 30, 32767),
    seed(43, "Japan", 8845, 1111, 626, 10, -90, 77, 11, 9, 77, 237, 90, 60),
    seed(44, "North Korea", 170, 159, 121, -60, 30, 38, 22, 5, 70, 470, 0, 88),
    seed(45, "South Korea", 480, 347, 326, 50, -30, 71, 23, 7, 77, 630, 95, 2747),
    seed(46, "Australia", 1148, 138, 289, 0, -100, 31, 21, 9, 59, 70, 90, 0),
    seed(47, "China", 2190, 8388, 1436, -60, 100, 52, 16, 8, 70, 4300, 50, 25961),
    seed(48, "VietNam", 693, 435, 1386, -70, 110, 8, 28, 6, 70, 643, 10, 32767),
    seed(49, "Turkey", 539, 399, 258, 50, -60, 40, 26, 7, 46, 453, 70, 267),
    seed(50, "Syria", 78, 73, 118, -30, 60, 22, 30, 6, 32, 230, 30, 1916),
    seed(51, "Israel", 138, 34, 407, 20, -60, 52, 39, 9, 59, 190, 80, 84),
    seed(52, "Taiwan", 149, 165, 209, 60, -100, 63, 32, 8, 75, 504, 70, 5349),
    seed(53, "Iraq", 225, 111, 487, -50, 60, 33, 31, 5, 69, 155, 40, 7215),
    seed(54, "Saudi Arabia", 542, 90, 1383, 70, -70, 66, 25, 6, 77, 95, 80, 1),
    seed(55, "Iran", 555, 324, 1060, -30, 20, 81, 27, 6, 77, 385, 50, 1025),
    seed(56, "Afghanistan", 27, 193, 7, -80, 20, -1, 20, 2, 60, 130, 20, 32767),
    seed(57, "Pakistan", 182, 705, 91, -10, 20, 13, 23, 5, 41, 502, 60, 32767),
    seed(58, "India", 1175, 6132, 365, -30, 20, 13, 23, 6, 54, 1670, 50, 7590),
    seed(59, "Burma", 45, 312, 17, 30, -70, 7, 21, 6, 25, 209, 50, 5598),
    seed(60, "Thailand", 234, 421, 98, 30, -40, 46, 30, 8, 69, 227, 60, 1570),
    seed(61, "Indonesia", 458, 1360, 159, 40, -80, 24, 24, 7, 51, 260, 70, 32767),
    seed(62, "Philippines", 244, 444, 55, 30, -70, 25, 31, 3, 61, 120, 80, 14001),
    seed(63, "Guatemala", 61, 61, 6, 60, -60, 24, 29, 6, 51, 13, 70, 499),
    seed(64, "El Salvador", 28, 41, 5, 30, -70, 18, 31, 4, 59, 8, 70, 25000),
    seed(65, "Costa Rica", 34, 20, 0, 20, -80, 34, 34, 8, 62, 2, 70, 76),
    seed(66, "Mauritania", 4, 13, 3, 30, -40, 38, 19, 3, 102, 3, 40, 3),
    seed(67, "Guinea", 13, 44, 2, 30, -60, 2, 20, 5, 60, 7, 50, 10),
    seed(68, "Ivory Coast", 74, 49, 5, 50, -50, 35, 22, 6, 77, 7, 50, 1),
    seed(69, "Burkina Faso", 9, 60, 2, -30, 40, 7, 19, 2, 56, 5, 40, 12),
    seed(70, "Ghana", 42, 99, 7, -40, 30, -1, 27, 5, 25, 20, 50, 125),
    seed(71, "Niger", 12, 46, 1, -50, 40, -12, 26, 4, 15, 4, 50, 24),
    seed(72, "Chad", 6, 39, 2, 30, -70, -10, 14, 3, 44, 11, 50, 2291),
    seed(73, "Cameroon", 40, 64, 6, 40, -40, 30, 16, 5, 54, 10, 50, 15725),
    seed(74, "Central Africa", 5, 18, 1, 40, -60, 4, 18, 2, 36, 3, 50, 2),
    seed(75, "Congo", 9, 13, 4, -60, 40, 29, 20, 3, 40, 7, 40, 742),
    seed(76, "Zimbabwe", 33, 63, 22, -40, 70, 24, 38, 4, 44, 15, 50, 3871),
    seed(77, "Botswana", 5, 7, 1, -20, 40, 60, 20, 7, 67, 1, 50, 6),
    seed(78, "Jordan", 24, 27, 28, 40, -50, 13, 31, 8, 108, 60, 70, 2159),
    seed(79, "Lebanon", 33, 28, 8, 0, -30, 2, 28, 1, 51, 20, 50, 32767),
    seed(80, "Bolivia", 27, 54, 7, 50, -60, 25, 24, 4, 46, 20, 70, 4414),
];

/// Opening affinity of each country toward the USA. Ids not listed use
/// [`USA_DEFAULT_AFFINITY`].
pub const USA_AFFINITY: [(u8, i64); 8] = [
    (2, -80),
    (3, 40),
    (4, 50),
    (5, -100),
    (6, 30),
    (7, -80),
    (8, -10),
    (9, 50),
];
pub const USA_DEFAULT_AFFINITY: i64 = 20;

/// Opening affinity toward the USSR, written after the USA row.
pub const USSR_AFFINITY: [(u8, i64); 6] = [
    (1, -80),
    (3, 10),
    (4, -30),
    (5, 80),
    (6, 0),
    (7, 100),
];
pub const USSR_DEFAULT_AFFINITY: i64 = 0;

/// (superpower id, instrument, target id, level) already in force in 1989.
pub const POLICY_SEEDS: [(u8, PolicyKind, u8, u8); 70] = [
    (1, PolicyKind::EconomicAid, 14, 3),
    (1, PolicyKind::EconomicAid, 15, 4),
    (1, PolicyKind::EconomicAid, 16, 3),
    (1, PolicyKind::EconomicAid, 17, 3),
    (1, PolicyKind::EconomicAid, 18, 2),
    (1, PolicyKind::EconomicAid, 19, 2),
    (1, PolicyKind::EconomicAid, 20, 2),
    (1, PolicyKind::EconomicAid, 22, 3),
    (1, PolicyKind::EconomicAid, 51, 3),
    (1, PolicyKind::EconomicAid, 52, 2),
    (2, PolicyKind::EconomicAid, 21, 4),
    (2, PolicyKind::EconomicAid, 23, 3),
    (2, PolicyKind::EconomicAid, 24, 2),
    (2, PolicyKind::EconomicAid, 25, 3),
    (2, PolicyKind::EconomicAid, 26, 3),
    (2, PolicyKind::EconomicAid, 27, 3),
    (2, PolicyKind::EconomicAid, 28, 2),
    (2, PolicyKind::EconomicAid, 29, 2),
    (2, PolicyKind::EconomicAid, 30, 2),
    (2, PolicyKind::EconomicAid, 31, 3),
    (2, PolicyKind::EconomicAid, 35, 2),
    (2, PolicyKind::EconomicAid, 36, 2),
    (2, PolicyKind::EconomicAid, 37, 3),
    (2, PolicyKind::EconomicAid, 38, 3),
    (2, PolicyKind::EconomicAid, 39, 2),
    (2, PolicyKind::EconomicAid, 40, 2),
    (2, PolicyKind::EconomicAid, 41, 2),
    (2, PolicyKind::EconomicAid, 42, 2),
    (2, PolicyKind::EconomicAid, 43, 3),
    (2, PolicyKind::EconomicAid, 44, 2),
    (2, PolicyKind::EconomicAid, 45, 2),
    (2, PolicyKind::EconomicAid, 46, 3),
    (2, PolicyKind::EconomicAid, 47, 3),
    (2, PolicyKind::EconomicAid, 48, 3),
    (2, PolicyKind::EconomicAid, 49, 2),
    (2, PolicyKind::EconomicAid, 50, 2),
    (1, PolicyKind::MilitaryAid, 14, 2),
    (1, PolicyKind::MilitaryAid, 15, 3),
    (1, PolicyKind::MilitaryAid, 16, 2),
    (1, PolicyKind::MilitaryAid, 17, 2),
    (1, PolicyKind::MilitaryAid, 22, 3),
    (1, PolicyKind::MilitaryAid, 51, 2),
    (2, PolicyKind::MilitaryAid, 21, 3),
    (2, PolicyKind::MilitaryAid, 23, 2),
    (2, PolicyKind::MilitaryAid, 25, 2),
    (2, PolicyKind::MilitaryAid, 26, 2),
    (2, PolicyKind::MilitaryAid, 27, 2),
    (2, PolicyKind::MilitaryAid, 37, 2),
    (2, PolicyKind::MilitaryAid, 38, 2),
    (2, PolicyKind::MilitaryAid, 43, 2),
    (2, PolicyKind::MilitaryAid, 46, 2),
    (2, PolicyKind::MilitaryAid, 47, 2),
    (2, PolicyKind::MilitaryAid, 48, 2),
    (1, PolicyKind::Treaty, 14, 3),
    (1, PolicyKind::Treaty, 15, 4),
    (1, PolicyKind::Treaty, 16, 3),
    (1, PolicyKind::Treaty, 17, 3),
    (1, PolicyKind::Treaty, 22, 3),
    (1, PolicyKind::Treaty, 51, 3),
    (2, PolicyKind::Treaty, 21, 4),
    (2, PolicyKind::Treaty, 23, 3),
    (2, PolicyKind::Treaty, 25, 3),
    (2, PolicyKind::Treaty, 26, 3),
    (2, PolicyKind::Treaty, 27, 3),
    (2, PolicyKind::Treaty, 37, 3),
    (2, PolicyKind::Treaty, 38, 3),
    (2, PolicyKind::Treaty, 43, 3),
    (2, PolicyKind::Treaty, 46, 3),
    (2, PolicyKind::Treaty, 47, 3),
    (2, PolicyKind::Treaty, 48, 3),
];

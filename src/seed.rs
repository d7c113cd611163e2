//! Reference data written into a fresh database
//!
//! Ports, container types, cargo types and routes are rewritten on startup when
//! `Config::refresh_reference_data` is set and otherwise only seeded into
//! empty tables. Users, bookings and settings are never touched here.

use chrono::Utc;
use redb::Database;
use uuid::Uuid;

use crate::database::{
    self, StoreError, TABLE_CARGO_TYPES, TABLE_CONTAINER_TYPES, TABLE_PORTS, TABLE_ROUTES,
};
use crate::model::{
    CargoType, ContainerType, DeliveryTerm, Port, ShippingRoute, TRANSPORT_AIR, TRANSPORT_RAIL,
    TRANSPORT_SEA,
};

const SEA: &str = TRANSPORT_SEA;
const RAIL: &str = TRANSPORT_RAIL;
const AIR: &str = TRANSPORT_AIR;

/// (name, code, country, city, transport modes)
type StationRow = (&'static str, &'static str, &'static str, &'static str, &'static [&'static str]);

/// (origin, destination, mode, carrier, transit days, base price, container types, frequency)
type RouteRow = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    u32,
    f64,
    &'static [&'static str],
    &'static str,
);

#[rustfmt::skip]
const STATIONS: &[StationRow] = &[
    ("Санкт-Петербург", "LED", "Россия", "Санкт-Петербург", &[SEA, RAIL, AIR]),
    ("Новороссийск", "NVS", "Россия", "Новороссийск", &[SEA, RAIL]),
    ("Калининград", "KGD", "Россия", "Калининград", &[SEA, RAIL, AIR]),
    ("Владивосток", "VVO", "Россия", "Владивосток", &[SEA, RAIL, AIR]),
    ("Мурманск", "MMK", "Россия", "Мурманск", &[SEA]),
    ("Архангельск", "ARH", "Россия", "Архангельск", &[SEA]),
    ("Москва", "SVO", "Россия", "Москва", &[RAIL, AIR]),
    ("Екатеринбург", "SVX", "Россия", "Екатеринбург", &[RAIL, AIR]),
    ("Новосибирск", "OVB", "Россия", "Новосибирск", &[RAIL, AIR]),
    ("Красноярск", "KJA", "Россия", "Красноярск", &[RAIL, AIR]),
    ("Иркутск", "IKT", "Россия", "Иркутск", &[RAIL, AIR]),
    ("Хабаровск", "KHV", "Россия", "Хабаровск", &[RAIL, AIR]),
    ("Челябинск", "CEK", "Россия", "Челябинск", &[RAIL, AIR]),
    ("Омск", "OMS", "Россия", "Омск", &[RAIL, AIR]),
    ("Селятино", "SEL", "Россия", "Селятино", &[RAIL]),
    ("Кунцево-2", "KUN", "Россия", "Кунцево", &[RAIL]),
    ("Белый Раст", "BRZ", "Россия", "Белый Раст", &[RAIL]),
    ("Восточный", "VST", "Россия", "Восточный", &[SEA, RAIL]),
    ("Одесса", "ODS", "Украина", "Одесса", &[SEA, RAIL]),
    ("Киев", "KBP", "Украина", "Киев", &[RAIL, AIR]),
    ("Харьков", "HRK", "Украина", "Харьков", &[RAIL, AIR]),
    ("Днепр", "DNK", "Украина", "Днепр", &[RAIL, AIR]),
    ("Актау", "SCO", "Казахстан", "Актау", &[SEA, RAIL]),
    ("Алматы", "ALA", "Казахстан", "Алматы", &[RAIL, AIR]),
    ("Нур-Султан", "NQZ", "Казахстан", "Нур-Султан", &[RAIL, AIR]),
    ("Хоргос", "KHG", "Казахстан", "Хоргос", &[RAIL]),
    ("Достык", "DOS", "Казахстан", "Достык", &[RAIL]),
    ("Алтынколь", "ALT", "Казахстан", "Алтынколь", &[RAIL]),
    ("Шымкент", "CIT", "Казахстан", "Шымкент", &[RAIL, AIR]),
    ("Караганда", "KGF", "Казахстан", "Караганда", &[RAIL, AIR]),
    ("Атырау", "GUW", "Казахстан", "Атырау", &[RAIL, AIR]),
    ("Минск", "MSQ", "Беларусь", "Минск", &[RAIL, AIR]),
    ("Брест", "BQT", "Беларусь", "Брест", &[RAIL]),
    ("Гомель", "GME", "Беларусь", "Гомель", &[RAIL]),
    ("Витебск", "VTB", "Беларусь", "Витебск", &[RAIL]),
    ("Гродно", "GNA", "Беларусь", "Гродно", &[RAIL]),
    ("Могилев", "MVQ", "Беларусь", "Могилев", &[RAIL]),
    ("Батуми", "BUS", "Грузия", "Батуми", &[SEA, RAIL]),
    ("Поти", "POT", "Грузия", "Поти", &[SEA]),
    ("Тбилиси", "TBS", "Грузия", "Тбилиси", &[RAIL, AIR]),
    ("Баку", "BAK", "Азербайджан", "Баку", &[SEA, RAIL, AIR]),
    ("Сумгаит", "SMG", "Азербайджан", "Сумгаит", &[RAIL]),
    ("Ташкент", "TAS", "Узбекистан", "Ташкент", &[RAIL, AIR]),
    ("Самарканд", "SKD", "Узбекистан", "Самарканд", &[RAIL, AIR]),
    ("Андижан", "AZN", "Узбекистан", "Андижан", &[RAIL]),
    ("Фергана", "FEG", "Узбекистан", "Фергана", &[RAIL]),
    ("Бухара", "BHK", "Узбекистан", "Бухара", &[RAIL]),
    ("Хива", "UGC", "Узбекистан", "Хива", &[RAIL]),
    ("Кишинев", "KIV", "Молдова", "Кишинев", &[RAIL, AIR]),
    ("Унгены", "UNG", "Молдова", "Унгены", &[RAIL]),
    ("Бишкек", "FRU", "Кыргызстан", "Бишкек", &[RAIL, AIR]),
    ("Ош", "OSS", "Кыргызстан", "Ош", &[RAIL, AIR]),
    ("Душанбе", "DYU", "Таджикистан", "Душанбе", &[RAIL, AIR]),
    ("Худжанд", "LBD", "Таджикистан", "Худжанд", &[RAIL]),
    ("Ашхабад", "ASB", "Туркменистан", "Ашхабад", &[RAIL, AIR]),
    ("Туркменабад", "CRZ", "Туркменистан", "Туркменабад", &[RAIL]),
    ("Туркменбаши", "KRW", "Туркменистан", "Туркменбаши", &[SEA, RAIL]),
    ("Ереван", "EVN", "Армения", "Ереван", &[RAIL, AIR]),
    ("Гюмри", "LWN", "Армения", "Гюмри", &[RAIL]),
    ("Шанхай", "SHA", "Китай", "Шанхай", &[SEA, RAIL, AIR]),
    ("Чэнду", "CTU", "Китай", "Чэнду", &[RAIL, AIR]),
    ("Шэньчжэнь", "SZX", "Китай", "Шэньчжэнь", &[SEA, RAIL, AIR]),
    ("Гуанчжоу", "CAN", "Китай", "Гуанчжоу", &[SEA, RAIL, AIR]),
    ("Тяньцзинь", "TSN", "Китай", "Тяньцзинь", &[SEA, RAIL]),
    ("Далянь", "DLC", "Китай", "Далянь", &[SEA, RAIL]),
    ("Циндао", "TAO", "Китай", "Циндао", &[SEA]),
    ("Нинбо", "NGB", "Китай", "Нинбо", &[SEA]),
    ("Сямынь", "XMN", "Китай", "Сямынь", &[SEA, AIR]),
    ("Урумчи", "URC", "Китай", "Урумчи", &[RAIL, AIR]),
    ("Пекин", "PEK", "Китай", "Пекин", &[RAIL, AIR]),
    ("Хуньчунь", "HUN", "Китай", "Хуньчунь", &[RAIL]),
    ("Иу", "YIW", "Китай", "Иу", &[RAIL]),
    ("Сиань", "SIA", "Китай", "Сиань", &[RAIL, AIR]),
    ("Ухань", "WUH", "Китай", "Ухань", &[RAIL, AIR]),
    ("Чунцин", "CKG", "Китай", "Чунцин", &[RAIL, AIR]),
    ("Нанкин", "NKG", "Китай", "Нанкин", &[RAIL, AIR]),
    ("Ханчжоу", "HGH", "Китай", "Ханчжоу", &[RAIL, AIR]),
    ("Циньчжоу", "QIN", "Китай", "Циньчжоу", &[SEA, RAIL]),
    ("Шилун", "SIL", "Китай", "Шилун", &[RAIL]),
    ("Алашанькоу", "ALA", "Китай", "Алашанькоу", &[RAIL]),
    ("Эренхот", "ERE", "Китай", "Эренхот", &[RAIL]),
    ("Маньчжоули", "NZH", "Китай", "Маньчжоули", &[RAIL]),
    ("Суйфэньхэ", "SUI", "Китай", "Суйфэньхэ", &[RAIL]),
    ("Дунин", "DON", "Китай", "Дунин", &[RAIL]),
    ("Цзинань", "TNA", "Китай", "Цзинань", &[RAIL, AIR]),
    ("Тайюань", "TYN", "Китай", "Тайюань", &[RAIL, AIR]),
    ("Шицзячжуан", "SJW", "Китай", "Шицзячжуан", &[RAIL, AIR]),
    ("Лань чжоу", "LHW", "Китай", "Ланьчжоу", &[RAIL, AIR]),
    ("Гуйян", "KWE", "Китай", "Гуйян", &[RAIL, AIR]),
    ("Куньмин", "KMG", "Китай", "Куньмин", &[RAIL, AIR]),
    ("Нанчан", "KHN", "Китай", "Нанчан", &[RAIL, AIR]),
    ("Хэфэй", "HFE", "Китай", "Хэфэй", &[RAIL, AIR]),
    ("Фучжоу", "FOC", "Китай", "Фучжоу", &[RAIL, AIR]),
    ("Наньнин", "NNG", "Китай", "Наньнин", &[RAIL, AIR]),
    ("Хайкоу", "HAK", "Китай", "Хайкоу", &[AIR]),
    ("Синин", "XNN", "Китай", "Синин", &[RAIL, AIR]),
    ("Иньчуань", "INC", "Китай", "Иньчуань", &[RAIL, AIR]),
    ("Хух-Хото", "HET", "Китай", "Хух-Хото", &[RAIL, AIR]),
    ("Харбин", "HRB", "Китай", "Харбин", &[RAIL, AIR]),
    ("Чанчунь", "CGQ", "Китай", "Чанчунь", &[RAIL, AIR]),
    ("Шэньян", "SHE", "Китай", "Шэньян", &[RAIL, AIR]),
    ("Далянь-Порт", "DLP", "Китай", "Далянь", &[RAIL]),
    ("Цзилинь", "JIL", "Китай", "Цзилинь", &[RAIL]),
    ("Хэнъян", "HNY", "Китай", "Хэнъян", &[RAIL]),
    ("Чанша", "CSX", "Китай", "Чанша", &[RAIL, AIR]),
    ("Фошань", "FOS", "Китай", "Фошань", &[RAIL]),
    ("Дунгуань", "DGU", "Китай", "Дунгуань", &[RAIL]),
    ("Чжухай", "ZUH", "Китай", "Чжухай", &[RAIL, AIR]),
    ("Шаньтоу", "SWA", "Китай", "Шаньтоу", &[RAIL, AIR]),
    ("Цзянмэнь", "JMN", "Китай", "Цзянмэнь", &[RAIL]),
    ("Чжаньцзян", "ZHA", "Китай", "Чжаньцзян", &[SEA, RAIL]),
    ("Хуэйчжоу", "HUI", "Китай", "Хуэйчжоу", &[RAIL]),
    ("Гамбург", "HAM", "Германия", "Гамбург", &[SEA, RAIL]),
    ("Роттердам", "RTM", "Нидерланды", "Роттердам", &[SEA]),
    ("Антверпен", "ANR", "Бельгия", "Антверпен", &[SEA]),
    ("Феликстоу", "FXT", "Великобритания", "Феликстоу", &[SEA]),
    ("Стамбул", "IST", "Турция", "Стамбул", &[SEA, RAIL, AIR]),
    ("Констанца", "CND", "Румыния", "Констанца", &[SEA]),
    ("Пирей", "ATH", "Греция", "Пирей", &[SEA]),
    ("Варна", "VAR", "Болгария", "Варна", &[SEA]),
    ("Дуйсбург", "DUI", "Германия", "Дуйсбург", &[RAIL]),
    ("Мальашевиче", "MAL", "Польша", "Мальашевиче", &[RAIL]),
    ("Варшава", "WAW", "Польша", "Варшава", &[RAIL, AIR]),
    ("Прага", "PRG", "Чехия", "Прага", &[RAIL, AIR]),
    ("Будапешт", "BUD", "Венгрия", "Будапешт", &[RAIL, AIR]),
    ("Бухарест", "OTP", "Румыния", "Бухарест", &[RAIL, AIR]),
    ("София", "SOF", "Болгария", "София", &[RAIL, AIR]),
    ("Белград", "BEG", "Сербия", "Белград", &[RAIL, AIR]),
    ("Загреб", "ZAG", "Хорватия", "Загреб", &[RAIL, AIR]),
    ("Любляна", "LJU", "Словения", "Любляна", &[RAIL, AIR]),
    ("Братислава", "BTS", "Словакия", "Братислава", &[RAIL, AIR]),
    ("Вена", "VIE", "Австрия", "Вена", &[RAIL, AIR]),
    ("Мюнхен", "MUC", "Германия", "Мюнхен", &[RAIL, AIR]),
    ("Берлин", "BER", "Германия", "Берлин", &[RAIL, AIR]),
    ("Франкфурт", "FRA", "Германия", "Франкфурт", &[RAIL, AIR]),
    ("Амстердам", "AMS", "Нидерланды", "Амстердам", &[RAIL, AIR]),
    ("Париж", "CDG", "Франция", "Париж", &[RAIL, AIR]),
    ("Лион", "LYS", "Франция", "Лион", &[RAIL, AIR]),
    ("Милан", "MXP", "Италия", "Милан", &[RAIL, AIR]),
    ("Рим", "ROM", "Италия", "Рим", &[RAIL, AIR]),
    ("Мадрид", "MAD", "Испания", "Мадрид", &[RAIL, AIR]),
    ("Барселона", "BCN", "Испания", "Барселона", &[RAIL, AIR]),
    ("Лондон", "LHR", "Великобритания", "Лондон", &[RAIL, AIR]),
    ("Манчестер", "MAN", "Великобритания", "Манчестер", &[RAIL, AIR]),
    ("Дубай", "DXB", "ОАЭ", "Дубай", &[SEA, AIR]),
    ("Пусан", "PUS", "Южная Корея", "Пусан", &[SEA]),
    ("Сеул", "ICN", "Южная Корея", "Сеул", &[AIR]),
    ("Сингапур", "SIN", "Сингапур", "Сингапур", &[SEA, AIR]),
    ("Бомбей", "BOM", "Индия", "Мумбаи", &[SEA, AIR]),
    ("Дели", "DEL", "Индия", "Дели", &[RAIL, AIR]),
    ("Коломбо", "CMB", "Шри-Ланка", "Коломбо", &[SEA]),
    ("Токио", "NRT", "Япония", "Токио", &[AIR]),
    ("Иокогама", "YOK", "Япония", "Иокогама", &[SEA]),
    ("Бангкок", "BKK", "Таиланд", "Бангкок", &[AIR]),
    ("Хошимин", "SGN", "Вьетнам", "Хошимин", &[SEA, AIR]),
    ("Ханой", "HAN", "Вьетнам", "Ханой", &[RAIL, AIR]),
    ("Джакарта", "CGK", "Индонезия", "Джакарта", &[SEA, AIR]),
    ("Манила", "MNL", "Филиппины", "Манила", &[SEA, AIR]),
    ("Куала-Лумпур", "KUL", "Малайзия", "Куала-Лумпур", &[AIR]),
    ("Порт-Кланг", "PKL", "Малайзия", "Порт-Кланг", &[SEA]),
];

#[rustfmt::skip]
const ROUTES: &[RouteRow] = &[
    ("SHA", "LED", SEA, "COSCO", 35, 1200.0, &["20ft", "40ft"], "Weekly"),
    ("HAM", "NVS", SEA, "Maersk", 12, 800.0, &["20ft", "40ft", "20ft Reefer"], "Daily"),
    ("SZX", "VVO", SEA, "Evergreen", 18, 850.0, &["20ft", "40ft"], "Weekly"),
    ("CTU", "LED", RAIL, "China Railways Express", 15, 950.0, &["20ft", "40ft"], "Daily"),
    ("YIW", "MSQ", RAIL, "New Silk Road Express", 18, 780.0, &["20ft", "40ft"], "Weekly"),
    ("URC", "SVO", RAIL, "TransSiberian Express", 12, 680.0, &["20ft", "40ft"], "Daily"),
    ("PEK", "SVX", RAIL, "Eurasia Express", 10, 750.0, &["20ft", "40ft"], "Daily"),
    ("SIA", "DUI", RAIL, "Chang'an Express", 16, 850.0, &["20ft", "40ft"], "Weekly"),
    ("WUH", "HAM", RAIL, "Wuhan-Europe Express", 18, 920.0, &["20ft", "40ft"], "Weekly"),
    ("CKG", "NQZ", RAIL, "Chongqing-Kazakhstan Express", 8, 580.0, &["20ft", "40ft"], "Daily"),
    ("HGH", "MAL", RAIL, "Hangzhou-Europe Express", 20, 980.0, &["20ft", "40ft"], "Weekly"),
    ("NKG", "MSQ", RAIL, "Nanjing-Belarus Express", 17, 880.0, &["20ft", "40ft"], "Weekly"),
    ("CSX", "TAS", RAIL, "Changsha-Central Asia Express", 14, 720.0, &["20ft", "40ft"], "Weekly"),
    ("TNA", "KHG", RAIL, "Jinan-Khorgos Express", 6, 450.0, &["20ft", "40ft"], "Daily"),
    ("LHW", "ALA", RAIL, "Lanzhou-Almaty Express", 4, 380.0, &["20ft", "40ft"], "Daily"),
    ("KWE", "FRU", RAIL, "Guiyang-Bishkek Express", 12, 650.0, &["20ft", "40ft"], "Weekly"),
    ("KMG", "HAN", RAIL, "Kunming-Hanoi Express", 2, 250.0, &["20ft", "40ft"], "Daily"),
    ("MSQ", "LED", RAIL, "Belarus Railways", 1, 180.0, &["20ft", "40ft"], "Daily"),
    ("ALA", "SVO", RAIL, "Kazakhstan Temir Zholy", 4, 420.0, &["20ft", "40ft"], "Daily"),
    ("TAS", "ALA", RAIL, "O'zbekiston Temir Yo'llari", 2, 280.0, &["20ft", "40ft"], "Daily"),
    ("BAK", "TBS", RAIL, "Azerbaijan Railways", 1, 150.0, &["20ft", "40ft"], "Daily"),
    ("KHG", "ALA", RAIL, "Silk Road Logistics", 1, 120.0, &["20ft", "40ft"], "Daily"),
    ("DOS", "NQZ", RAIL, "KTZ Express", 2, 200.0, &["20ft", "40ft"], "Daily"),
    ("BQT", "MAL", RAIL, "Belarus-Poland Express", 1, 100.0, &["20ft", "40ft"], "Daily"),
    ("EVN", "BAK", RAIL, "South Caucasus Railway", 1, 160.0, &["20ft", "40ft"], "Daily"),
    ("LED", "HAM", RAIL, "RZD Logistics", 7, 620.0, &["20ft", "40ft"], "Daily"),
    ("SVO", "BER", RAIL, "Russian Railways", 5, 480.0, &["20ft", "40ft"], "Daily"),
    ("MSQ", "VIE", RAIL, "Belarus-Austria Express", 3, 360.0, &["20ft", "40ft"], "Weekly"),
    ("KBP", "PRG", RAIL, "Ukraine Railways", 2, 280.0, &["20ft", "40ft"], "Weekly"),
    ("PEK", "SVO", AIR, "Air China Cargo", 1, 450.0, &["20ft", "40ft"], "Daily"),
    ("CTU", "LED", AIR, "Sichuan Airlines Cargo", 1, 380.0, &["20ft"], "Daily"),
    ("CAN", "BAK", AIR, "China Southern Cargo", 1, 520.0, &["20ft", "40ft"], "Weekly"),
    ("SHA", "FRA", AIR, "Lufthansa Cargo", 1, 680.0, &["20ft", "40ft"], "Daily"),
    ("URC", "ALA", AIR, "Kazakhstan Air", 1, 220.0, &["20ft"], "Daily"),
    ("LED", "CTU", RAIL, "RZD-China Express", 16, 900.0, &["20ft", "40ft"], "Weekly"),
    ("NVS", "SHA", SEA, "COSCO", 38, 1250.0, &["20ft", "40ft"], "Weekly"),
    ("VVO", "CAN", SEA, "MSC", 12, 680.0, &["20ft", "40ft"], "Daily"),
    ("ALA", "YIW", RAIL, "Central Asia Express", 5, 480.0, &["20ft", "40ft"], "Weekly"),
    ("DUI", "WUH", RAIL, "Germany-China Express", 19, 960.0, &["20ft", "40ft"], "Weekly"),
    ("MAL", "CKG", RAIL, "Poland-China Express", 14, 820.0, &["20ft", "40ft"], "Weekly"),
];

/// Incoterms 2020 rules offered on the booking form
const DELIVERY_TERMS: [(&str, &str, &str); 8] = [
    ("EXW", "Ex Works", "Buyer collects the goods at the seller's premises"),
    ("FCA", "Free Carrier", "Seller hands cleared goods to the buyer's carrier at the named place"),
    ("CPT", "Carriage Paid To", "Seller pays carriage to the named destination, risk passes at handover"),
    ("CIP", "Carriage and Insurance Paid To", "As CPT, with seller-arranged cargo insurance"),
    ("DAP", "Delivered at Place", "Seller delivers ready for unloading at the named destination"),
    ("DPU", "Delivered at Place Unloaded", "Seller delivers and unloads at the named destination"),
    ("DDP", "Delivered Duty Paid", "Seller delivers cleared for import with duties paid"),
    ("FOB", "Free on Board", "Seller loads the goods on board the vessel at the port of shipment"),
];

pub fn stations() -> Vec<Port> {
    STATIONS
        .iter()
        .map(|(name, code, country, city, modes)| Port {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            code: code.to_string(),
            country: country.to_string(),
            city: city.to_string(),
            transport_types: modes.iter().map(|m| m.to_string()).collect(),
        })
        .collect()
}

pub fn container_types() -> Vec<ContainerType> {
    vec![
        ContainerType {
            id: Uuid::new_v4().to_string(),
            name: "20ft".to_string(),
            size: "20ft".to_string(),
            capacity_m3: 33.2,
            max_weight_kg: 28000,
            description: "Standard 20-foot container".to_string(),
            price_modifier: 1.0,
        },
        ContainerType {
            id: Uuid::new_v4().to_string(),
            name: "40ft".to_string(),
            size: "40ft".to_string(),
            capacity_m3: 67.7,
            max_weight_kg: 28000,
            description: "Standard 40-foot container".to_string(),
            price_modifier: 1.0,
        },
    ]
}

pub fn cargo_types() -> Vec<CargoType> {
    vec![
        CargoType {
            id: Uuid::new_v4().to_string(),
            name: "General cargo".to_string(),
            description: "Standard cargo without hazardous properties".to_string(),
            special_requirements: Vec::new(),
        },
        CargoType {
            id: Uuid::new_v4().to_string(),
            name: "Dangerous cargo".to_string(),
            description: "Cargo that requires special permits".to_string(),
            special_requirements: vec![
                "Dangerous goods declaration".to_string(),
                "Special permits".to_string(),
                "Certificates".to_string(),
            ],
        },
    ]
}

pub fn routes() -> Vec<ShippingRoute> {
    let now = Utc::now();
    ROUTES
        .iter()
        .map(
            |(origin, destination, mode, carrier, days, price, containers, frequency)| {
                ShippingRoute {
                    id: Uuid::new_v4().to_string(),
                    origin_port: origin.to_string(),
                    destination_port: destination.to_string(),
                    transport_type: mode.to_string(),
                    carrier: carrier.to_string(),
                    transit_time_days: *days,
                    base_price_usd: *price,
                    available_container_types: containers.iter().map(|c| c.to_string()).collect(),
                    frequency: frequency.to_string(),
                    created_at: now,
                }
            },
        )
        .collect()
}

pub fn delivery_terms() -> Vec<DeliveryTerm> {
    DELIVERY_TERMS
        .iter()
        .map(|(code, name, description)| DeliveryTerm {
            code: code.to_string(),
            name: name.to_string(),
            description: description.to_string(),
        })
        .collect()
}

pub fn is_known_delivery_term(code: &str) -> bool {
    DELIVERY_TERMS
        .iter()
        .any(|(known, _, _)| known.eq_ignore_ascii_case(code.trim()))
}

/// Station keys are zero-padded positions so listing keeps catalogue order
pub fn station_key(position: usize) -> String {
    format!("{:04}", position)
}

/// Writes reference data; with `refresh == false` only empty tables are filled
pub fn seed_reference_data(db: &Database, refresh: bool) -> Result<(), StoreError> {
    if refresh || database::count(db, TABLE_PORTS)? == 0 {
        let records: Vec<_> = stations()
            .into_iter()
            .enumerate()
            .map(|(position, port)| (station_key(position), port))
            .collect();
        database::replace_all(db, TABLE_PORTS, &records)?;
    }

    if refresh || database::count(db, TABLE_CONTAINER_TYPES)? == 0 {
        let records: Vec<_> = container_types()
            .into_iter()
            .map(|container| (container.id.clone(), container))
            .collect();
        database::replace_all(db, TABLE_CONTAINER_TYPES, &records)?;
    }

    if refresh || database::count(db, TABLE_CARGO_TYPES)? == 0 {
        let records: Vec<_> = cargo_types()
            .into_iter()
            .map(|cargo| (cargo.id.clone(), cargo))
            .collect();
        database::replace_all(db, TABLE_CARGO_TYPES, &records)?;
    }

    if refresh || database::count(db, TABLE_ROUTES)? == 0 {
        let records: Vec<_> = routes()
            .into_iter()
            .map(|route| (route.id.clone(), route))
            .collect();
        database::replace_all(db, TABLE_ROUTES, &records)?;
    }

    tracing::info!(
        stations = STATIONS.len(),
        routes = ROUTES.len(),
        refresh,
        "reference data ready"
    );
    Ok(())
}

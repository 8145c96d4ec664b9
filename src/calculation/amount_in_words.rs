//! Spanish amount-to-words conversion.
//!
//! Spells whole amounts using the long scale (millón = 10^6,
//! billón = 10^12, trillón = 10^18), which covers the full `u64` range.

const UNITS: [&str; 10] = [
    "cero", "uno", "dos", "tres", "cuatro", "cinco", "seis", "siete", "ocho", "nueve",
];

const TEENS: [&str; 10] = [
    "diez",
    "once",
    "doce",
    "trece",
    "catorce",
    "quince",
    "dieciséis",
    "diecisiete",
    "dieciocho",
    "diecinueve",
];

const TWENTIES: [&str; 10] = [
    "veinte",
    "veintiuno",
    "veintidós",
    "veintitrés",
    "veinticuatro",
    "veinticinco",
    "veintiséis",
    "veintisiete",
    "veintiocho",
    "veintinueve",
];

const TENS: [&str; 10] = [
    "", "", "", "treinta", "cuarenta", "cincuenta", "sesenta", "setenta", "ochenta", "noventa",
];

const HUNDREDS: [&str; 10] = [
    "",
    "ciento",
    "doscientos",
    "trescientos",
    "cuatrocientos",
    "quinientos",
    "seiscientos",
    "setecientos",
    "ochocientos",
    "novecientos",
];

const MILLION: u64 = 1_000_000;

/// Spells a whole number as a lowercase Spanish cardinal.
///
/// # Example
///
/// ```
/// use deadline_engine::calculation::amount_in_words;
///
/// assert_eq!(amount_in_words(0), "cero");
/// assert_eq!(amount_in_words(21), "veintiuno");
/// assert_eq!(amount_in_words(1_500_000), "un millón quinientos mil");
/// ```
pub fn amount_in_words(amount: u64) -> String {
    if amount == 0 {
        return UNITS[0].to_string();
    }

    let trillions = amount / (MILLION * MILLION * MILLION);
    let billions = (amount / (MILLION * MILLION)) % MILLION;
    let millions = (amount / MILLION) % MILLION;
    let rest = amount % MILLION;

    let parts = [
        scale(trillions, "trillón", "trillones"),
        scale(billions, "billón", "billones"),
        scale(millions, "millón", "millones"),
        below_million(rest),
    ];

    parts
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Spells an amount of pesos in uppercase, with the currency noun.
///
/// The trailing "uno" is shortened before the noun, and whole millions take
/// "de" before it.
///
/// # Example
///
/// ```
/// use deadline_engine::calculation::pesos_in_words;
///
/// assert_eq!(pesos_in_words(500_000), "QUINIENTOS MIL PESOS");
/// assert_eq!(pesos_in_words(1), "UN PESO");
/// assert_eq!(pesos_in_words(2_000_000), "DOS MILLONES DE PESOS");
/// ```
pub fn pesos_in_words(amount: u64) -> String {
    let words = apocope(&amount_in_words(amount));
    let noun = if amount == 1 { "peso" } else { "pesos" };
    let joiner = if amount >= MILLION && amount % MILLION == 0 {
        " de "
    } else {
        " "
    };
    format!("{}{}{}", words, joiner, noun).to_uppercase()
}

fn scale(count: u64, singular: &str, plural: &str) -> String {
    match count {
        0 => String::new(),
        1 => format!("un {}", singular),
        _ => format!("{} {}", apocope(&below_million(count)), plural),
    }
}

fn below_million(n: u64) -> String {
    let thousands = n / 1000;
    let rest = n % 1000;
    let head = match thousands {
        0 => String::new(),
        1 => "mil".to_string(),
        _ => format!("{} mil", apocope(&below_thousand(thousands))),
    };
    match (head.is_empty(), rest) {
        (_, 0) => head,
        (true, _) => below_thousand(rest),
        (false, _) => format!("{} {}", head, below_thousand(rest)),
    }
}

fn below_thousand(n: u64) -> String {
    if n == 100 {
        return "cien".to_string();
    }
    let hundreds = (n / 100) as usize;
    let rest = n % 100;
    match (hundreds, rest) {
        (0, _) => below_hundred(rest),
        (_, 0) => HUNDREDS[hundreds].to_string(),
        _ => format!("{} {}", HUNDREDS[hundreds], below_hundred(rest)),
    }
}

fn below_hundred(n: u64) -> String {
    let n = n as usize;
    match n {
        0..=9 => UNITS[n].to_string(),
        10..=19 => TEENS[n - 10].to_string(),
        20..=29 => TWENTIES[n - 20].to_string(),
        _ if n % 10 == 0 => TENS[n / 10].to_string(),
        _ => format!("{} y {}", TENS[n / 10], UNITS[n % 10]),
    }
}

/// Shortens a trailing "uno" before a scale word or noun.
fn apocope(words: &str) -> String {
    if let Some(head) = words.strip_suffix("veintiuno") {
        format!("{}veintiún", head)
    } else if let Some(head) = words.strip_suffix("uno") {
        format!("{}un", head)
    } else {
        words.to_string()
    }
}

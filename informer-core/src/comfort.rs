//! Clothing advice derived from the feels-like temperature.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Comfort {
    /// 0 °C and below.
    Frost,
    /// 1..=10 °C.
    Cold,
    /// 11..=17 °C.
    Cool,
    /// 18..=27 °C.
    Warm,
    /// 28..=35 °C.
    Hot,
    /// 36 °C and above.
    ExtremeHeat,
}

impl Comfort {
    pub fn classify(feels_like: i32) -> Self {
        match feels_like {
            1..=10 => Comfort::Cold,
            11..=17 => Comfort::Cool,
            18..=27 => Comfort::Warm,
            28..=35 => Comfort::Hot,
            36.. => Comfort::ExtremeHeat,
            _ => Comfort::Frost,
        }
    }

    pub fn advice(self) -> &'static str {
        match self {
            Comfort::Frost => {
                "Мороз. Наденьте теплую куртку (пуховик, пальто), шапку, теплую обувь, теплые штаны."
            }
            Comfort::Cold => {
                "Холодно. Наденьте легкую теплую куртку или пуловер, утепленные брюки или джинсы"
            }
            Comfort::Cool => "Прохладно. Наденьте легкую куртку или ветровку, брюки или джинсы",
            Comfort::Warm => {
                "Тепло. Выбирайте легкую одежду: Футболку, легкие брюки или шорты. \
                 Используйте легкую обувь, такую как сандалии или кроссовки."
            }
            Comfort::Hot => {
                "Жарко. Носите легкую и воздухопроницаемую одежду. Используйте шорты, футболки, \
                 топы или платья из легких материалов. Оптимально выбирать светлые цвета, \
                 которые отражают солнечные лучи. Наденьте шляпу или кепку, чтобы защититься \
                 от солнца. Используйте удобную и дышащую обувь, например, сандалии или открытые туфли."
            }
            Comfort::ExtremeHeat => {
                "Очень жарко. По возможности, оставайтесь в прохладном помещении. При выходе \
                 на улицу одевайтесь очень легко, пейте больше воды и старайтесь проводить \
                 меньше времени под прямыми солнечными лучами."
            }
        }
    }
}

/// Recommendation text for a feels-like temperature in °C.
pub fn recommendation(feels_like: i32) -> &'static str {
    Comfort::classify(feels_like).advice()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_partition_the_integers() {
        let cases = [
            (i32::MIN, Comfort::Frost),
            (-1, Comfort::Frost),
            (0, Comfort::Frost),
            (1, Comfort::Cold),
            (10, Comfort::Cold),
            (11, Comfort::Cool),
            (17, Comfort::Cool),
            (18, Comfort::Warm),
            (27, Comfort::Warm),
            (28, Comfort::Hot),
            (35, Comfort::Hot),
            (36, Comfort::ExtremeHeat),
            (37, Comfort::ExtremeHeat),
            (i32::MAX, Comfort::ExtremeHeat),
        ];

        for (feels_like, bucket) in cases {
            assert_eq!(Comfort::classify(feels_like), bucket, "feels_like {feels_like}");
        }
    }

    #[test]
    fn buckets_are_contiguous() {
        // Walking the line, the bucket only ever moves forward.
        let order = [
            Comfort::Frost,
            Comfort::Cold,
            Comfort::Cool,
            Comfort::Warm,
            Comfort::Hot,
            Comfort::ExtremeHeat,
        ];
        let rank = |c: Comfort| order.iter().position(|o| *o == c).unwrap();

        let mut previous = rank(Comfort::classify(-100));
        for t in -99..=100 {
            let current = rank(Comfort::classify(t));
            assert!(current == previous || current == previous + 1, "jump at {t}");
            previous = current;
        }
        assert_eq!(previous, order.len() - 1);
    }

    #[test]
    fn recommendation_text_matches_bucket() {
        assert!(recommendation(-15).starts_with("Мороз."));
        assert!(recommendation(5).starts_with("Холодно."));
        assert!(recommendation(15).starts_with("Прохладно."));
        assert!(recommendation(20).starts_with("Тепло."));
        assert!(recommendation(30).starts_with("Жарко."));
        assert!(recommendation(40).starts_with("Очень жарко."));
    }

    #[test]
    fn serializes_kebab_case() {
        let json = serde_json::to_string(&Comfort::ExtremeHeat).unwrap();
        assert_eq!(json, "\"extreme-heat\"");
    }
}

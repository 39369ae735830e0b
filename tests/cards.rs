use std::collections::HashMap;

use proptest::prelude::*;

use phaseten::card::{self, COPIES_PER_CARD, SKIP_COUNT, WILD_COUNT};
use phaseten::{Card, CardError, Color, DECK_SIZE, Rank, parse_sequence};

#[test]
fn full_deck_composition() {
    let deck = card::full_deck();
    assert_eq!(deck.len(), 108);
    assert_eq!(deck.len(), DECK_SIZE);

    let mut counts: HashMap<Card, usize> = HashMap::new();
    for card in &deck {
        *counts.entry(*card).or_default() += 1;
    }
    assert_eq!(counts[&Card::WILD], WILD_COUNT);
    assert_eq!(counts[&Card::SKIP], SKIP_COUNT);
    for color in Color::REAL {
        for rank in Rank::NUMBERED {
            let card = Card::new(color, rank).expect("real card");
            assert_eq!(counts[&card], COPIES_PER_CARD, "{card}");
        }
    }
    assert_eq!(counts.len(), 48 + 2);
}

#[test]
fn every_deck_card_round_trips() -> Result<(), CardError> {
    for card in card::full_deck() {
        assert_eq!(card.to_string().parse::<Card>()?, card);
    }
    Ok(())
}

#[test]
fn special_tokens() -> Result<(), CardError> {
    assert_eq!(card::parse_card("W")?, Card::WILD);
    assert_eq!(card::parse_card("S")?, Card::SKIP);
    assert_eq!(Card::WILD.to_string(), "W");
    assert_eq!(Card::SKIP.to_string(), "S");
    assert!(Card::WILD.is_wild());
    assert!(Card::SKIP.is_skip());
    assert_eq!(card::parse_card("G12")?.rank(), Rank::Twelve);
    assert_eq!(card::parse_card("Y10")?.color(), Color::Yellow);
    Ok(())
}

#[test]
fn sequence_parse_is_all_or_nothing() -> Result<(), CardError> {
    let cards = parse_sequence("R1  B12\tW S")?;
    assert_eq!(cards.len(), 4);
    assert_eq!(cards[1].to_string(), "B12");

    assert_eq!(
        parse_sequence("R1 B2 Q3 G4"),
        Err(CardError::UnknownColor {
            token: "Q3".to_string()
        })
    );
    assert_eq!(
        parse_sequence("R1 B0 Q3"),
        Err(CardError::UnknownRank {
            token: "B0".to_string()
        })
    );
    assert_eq!(parse_sequence("")?, Vec::new());
    Ok(())
}

#[test]
fn cards_serialize_as_tokens() -> Result<(), serde_json::Error> {
    let hand = parse_sequence("R5 W S G11").expect("valid hand");
    let json = serde_json::to_string(&hand)?;
    assert_eq!(json, r#"["R5","W","S","G11"]"#);
    let back: Vec<Card> = serde_json::from_str(&json)?;
    assert_eq!(back, hand);
    assert!(serde_json::from_str::<Card>(r#""R13""#).is_err());
    assert!(serde_json::from_str::<Card>(r#""WW""#).is_err());
    Ok(())
}

fn real_card() -> impl Strategy<Value = Card> {
    (0..Color::REAL.len(), 1u8..=12).prop_map(|(color, value)| {
        let rank = Rank::from_value(value).expect("value in range");
        Card::new(Color::REAL[color], rank).expect("real card")
    })
}

proptest! {
    #[test]
    fn real_cards_round_trip(card in real_card()) {
        prop_assert_eq!(card.to_string().parse::<Card>(), Ok(card));
    }

    #[test]
    fn sequences_round_trip(cards in prop::collection::vec(real_card(), 0..20)) {
        let text = cards.iter().map(Card::to_string).collect::<Vec<_>>().join(" ");
        prop_assert_eq!(parse_sequence(&text), Ok(cards));
    }
}

use anyhow::{Context, Result};
use csv::Writer;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const TRAIN_ROWS: u64 = 891;
const TEST_ROWS: u64 = 418;

const SURNAMES: [&str; 8] = [
    "Braund", "Cumings", "Heikkinen", "Futrelle", "Allen", "Moran", "McCarthy", "Palsson",
];
const GIVEN_MALE: [&str; 5] = ["Owen", "James", "William", "Thomas", "John"];
const GIVEN_FEMALE: [&str; 5] = ["Laina", "Florence", "Lily", "Ellen", "Anna"];
const PORTS: [&str; 3] = ["S", "C", "Q"];

/// One synthetic passenger, shaped like the Kaggle columns.
struct Passenger {
    id: u64,
    class: u32,
    name: String,
    sex: &'static str,
    age: String,
    siblings_spouses: u32,
    parents_children: u32,
    ticket: String,
    fare: f64,
    cabin: String,
    embarked: &'static str,
    survived: u8,
}

fn generate_passenger(id: u64, rng: &mut StdRng) -> Passenger {
    let class = *[1, 2, 3, 3, 3].choose(rng).unwrap_or(&3);
    let female = rng.gen_bool(0.35);
    let surname = SURNAMES.choose(rng).unwrap_or(&"Smith");
    let (sex, title, given) = if female {
        ("female", "Mrs.", GIVEN_FEMALE.choose(rng).unwrap_or(&"Mary"))
    } else {
        ("male", "Mr.", GIVEN_MALE.choose(rng).unwrap_or(&"John"))
    };

    // Infants are recorded with fractional ages.
    let age = if rng.gen_bool(0.03) {
        format!("{:.2}", rng.gen_range(0.1..1.0f64))
    } else {
        rng.gen_range(1..75u32).to_string()
    };

    let cabin = if class == 1 || rng.gen_bool(0.05) {
        let deck = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'T']
            .choose(rng)
            .copied()
            .unwrap_or('G');
        format!("{deck}{}", rng.gen_range(1..130))
    } else {
        String::new()
    };

    let survival_odds = match (female, class) {
        (true, 1 | 2) => 0.9,
        (true, _) => 0.5,
        (false, 1) => 0.35,
        (false, _) => 0.13,
    };

    Passenger {
        id,
        class,
        name: format!("{surname}, {title} {given}"),
        sex,
        age,
        siblings_spouses: rng.gen_range(0..4),
        parents_children: rng.gen_range(0..3),
        ticket: rng.gen_range(100_000..400_000u32).to_string(),
        fare: (90.0 / f64::from(class)) * rng.gen_range(0.2..1.5),
        cabin,
        embarked: *PORTS.choose(rng).unwrap_or(&"S"),
        survived: u8::from(rng.gen_bool(survival_odds)),
    }
}

fn main() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(42);

    let train: Vec<Passenger> = (1..=TRAIN_ROWS).map(|id| generate_passenger(id, &mut rng)).collect();
    let test: Vec<Passenger> = (TRAIN_ROWS + 1..=TRAIN_ROWS + TEST_ROWS)
        .map(|id| generate_passenger(id, &mut rng))
        .collect();

    let mut writer = Writer::from_path("train.csv").context("creating train.csv")?;
    writer.write_record([
        "PassengerId", "Survived", "Pclass", "Name", "Sex", "Age", "SibSp", "Parch", "Ticket", "Fare",
        "Cabin", "Embarked",
    ])?;
    for p in &train {
        writer.write_record([
            p.id.to_string(),
            p.survived.to_string(),
            p.class.to_string(),
            p.name.clone(),
            p.sex.to_string(),
            p.age.clone(),
            p.siblings_spouses.to_string(),
            p.parents_children.to_string(),
            p.ticket.clone(),
            format!("{:.4}", p.fare),
            p.cabin.clone(),
            p.embarked.to_string(),
        ])?;
    }
    writer.flush()?;

    let mut writer = Writer::from_path("test.csv").context("creating test.csv")?;
    writer.write_record([
        "PassengerId", "Pclass", "Name", "Sex", "Age", "SibSp", "Parch", "Ticket", "Fare", "Cabin",
        "Embarked",
    ])?;
    for p in &test {
        writer.write_record([
            p.id.to_string(),
            p.class.to_string(),
            p.name.clone(),
            p.sex.to_string(),
            p.age.clone(),
            p.siblings_spouses.to_string(),
            p.parents_children.to_string(),
            p.ticket.clone(),
            format!("{:.4}", p.fare),
            p.cabin.clone(),
            p.embarked.to_string(),
        ])?;
    }
    writer.flush()?;

    // Labels are shuffled so the id join, not row order, pairs them up.
    let mut labels: Vec<(u64, u8)> = test.iter().map(|p| (p.id, p.survived)).collect();
    labels.shuffle(&mut rng);
    let mut writer =
        Writer::from_path("gender_submission.csv").context("creating gender_submission.csv")?;
    writer.write_record(["PassengerId", "Survived"])?;
    for (id, survived) in labels {
        writer.write_record([id.to_string(), survived.to_string()])?;
    }
    writer.flush()?;

    println!(
        "Wrote {TRAIN_ROWS} training rows, {TEST_ROWS} testing rows and their labels to \
         train.csv, test.csv, gender_submission.csv"
    );
    Ok(())
}

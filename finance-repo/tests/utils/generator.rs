use super::unique_ofx_id;
use chrono::NaiveDate;
use fake::faker::lorem::en::Sentence;
use fake::{Fake, Faker};
use finance_repo::transaction_repo::NewTransaction;
use rand::seq::SliceRandom;
use rust_decimal::Decimal;

pub trait Generator<T> {
    fn gen(&mut self) -> T;
}

pub struct Predefined<T> {
    values: Vec<T>,
    current_pos: usize,
}

impl<T> Predefined<T> {
    pub fn boxed(values: Vec<T>) -> Box<Predefined<T>> {
        Box::new(Predefined {
            values,
            current_pos: 0,
        })
    }
}

impl<T: Clone> Generator<T> for Predefined<T> {
    fn gen(&mut self) -> T {
        let v = self.values[self.current_pos].clone();
        self.current_pos += 1;
        v
    }
}

pub struct RandomSample<T> {
    values: Vec<T>,
}

impl<T> RandomSample<T> {
    pub fn boxed(values: Vec<T>) -> Box<RandomSample<T>> {
        Box::new(RandomSample { values })
    }
}

impl<T: Clone> Generator<T> for RandomSample<T> {
    fn gen(&mut self) -> T {
        self.values.choose(&mut rand::thread_rng()).unwrap().clone()
    }
}

pub struct FakeGenerator<F: Fake> {
    fake: F,
}

impl<F: Fake> FakeGenerator<F> {
    pub fn boxed(fake: F) -> Box<FakeGenerator<F>> {
        Box::new(FakeGenerator { fake })
    }
}

impl<T: fake::Dummy<F>, F> Generator<T> for FakeGenerator<F> {
    fn gen(&mut self) -> T {
        self.fake.fake()
    }
}

/// Whole cents within `NUMERIC(10, 2)`.
pub struct FakeAmount;

impl Generator<Decimal> for FakeAmount {
    fn gen(&mut self) -> Decimal {
        Decimal::new(Faker.fake::<i32>() as i64, 2)
    }
}

pub struct FakeDate;

impl Generator<NaiveDate> for FakeDate {
    fn gen(&mut self) -> NaiveDate {
        let year = (2000..2030i32).fake::<i32>();
        let month = (1..13u32).fake::<u32>();
        let day = (1..29u32).fake::<u32>();
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }
}

pub struct NewTransactionGenerator {
    date_gen: Box<dyn Generator<NaiveDate>>,
    amnt_gen: Box<dyn Generator<Decimal>>,
    desc_gen: Box<dyn Generator<String>>,
    type_gen: Box<dyn Generator<Option<String>>>,
}

#[allow(dead_code)]
impl NewTransactionGenerator {
    pub fn with_dates(mut self, dates: Vec<NaiveDate>) -> NewTransactionGenerator {
        self.date_gen = Predefined::boxed(dates);
        self
    }

    pub fn with_amounts(mut self, amounts: Vec<Decimal>) -> NewTransactionGenerator {
        self.amnt_gen = Predefined::boxed(amounts);
        self
    }

    pub fn with_descriptions(mut self, descriptions: Vec<&str>) -> NewTransactionGenerator {
        let descriptions = descriptions.into_iter().map(|d| d.to_string()).collect();
        self.desc_gen = Predefined::boxed(descriptions);
        self
    }

    pub fn generate(&mut self, account_id: i32) -> NewTransaction {
        let new_transaction = NewTransaction::new(
            account_id,
            self.date_gen.gen(),
            self.amnt_gen.gen(),
            self.desc_gen.gen(),
            unique_ofx_id(),
        );
        match self.type_gen.gen() {
            Some(ofx_type) => new_transaction.with_ofx_type(ofx_type),
            None => new_transaction,
        }
    }

    pub fn generate_many(&mut self, account_id: i32, count: usize) -> Vec<NewTransaction> {
        let mut vec = Vec::with_capacity(count);
        for _ in 0..count {
            vec.push(self.generate(account_id))
        }
        vec
    }
}

impl Default for NewTransactionGenerator {
    fn default() -> Self {
        NewTransactionGenerator {
            date_gen: Box::new(FakeDate),
            amnt_gen: Box::new(FakeAmount),
            desc_gen: FakeGenerator::boxed(Sentence(2..6)),
            type_gen: RandomSample::boxed(vec![
                None,
                Some("DEBIT".to_string()),
                Some("CREDIT".to_string()),
                Some("POS".to_string()),
            ]),
        }
    }
}

pub fn generate_new_transaction(account_id: i32) -> NewTransaction {
    NewTransactionGenerator::default().generate(account_id)
}

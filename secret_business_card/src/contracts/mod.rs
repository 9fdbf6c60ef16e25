pub mod business_card;

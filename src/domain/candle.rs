// Define the CandleType enum
#[derive(Debug, PartialEq)]
pub enum CandleType {
    Bullish,
    Bearish,
}

// Define the Candle struct with all its properties
pub struct Candle {
    pub open_price: f64,
    pub high_price: f64,
    pub low_price: f64,
    pub close_price: f64,

    pub base_volume: f64,
    #[allow(dead_code)] // May be useful for future analysis
    pub quote_volume: f64,
}

impl Candle {
    // A constructor for convenience
    pub fn new(
        open_price: f64,
        high_price: f64,
        low_price: f64,
        close_price: f64,
        base_volume: f64,
        quote_volume: f64,
    ) -> Self {
        Candle {
            open_price,
            high_price,
            low_price,
            close_price,
            base_volume,
            quote_volume,
        }
    }

    // A method to determine the type of candle
    pub fn get_type(&self) -> CandleType {
        if self.close_price >= self.open_price {
            CandleType::Bullish
        } else {
            CandleType::Bearish
        }
    }

    /// Full traded range of the candle
    pub fn range(&self) -> f64 {
        self.high_price - self.low_price
    }
}

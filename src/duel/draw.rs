use rand::Rng;

/// Where the number of each round comes from.
pub trait DrawSource {
    /// Pick one number out of `pool`.
    fn draw(&mut self, pool: &[u8; 5]) -> u8;
}

/// Uniform draws backed by any [Rng].
#[derive(Debug)]
pub struct RngDraw<R>(pub R);

impl RngDraw<rand::rngs::ThreadRng> {
    pub fn thread() -> Self {
        Self(rand::thread_rng())
    }
}

impl<R: Rng> DrawSource for RngDraw<R> {
    fn draw(&mut self, pool: &[u8; 5]) -> u8 {
        pool[self.0.gen_range(0..pool.len())]
    }
}

/// Hands out a fixed sequence of draws, cycling once it runs out.
#[cfg(test)]
#[derive(Debug)]
pub struct Rigged {
    draws: Vec<u8>,
    next: usize,
}

#[cfg(test)]
impl Rigged {
    pub fn new(draws: &[u8]) -> Self {
        Self {
            draws: draws.to_vec(),
            next: 0,
        }
    }
}

#[cfg(test)]
impl DrawSource for Rigged {
    fn draw(&mut self, _pool: &[u8; 5]) -> u8 {
        let draw = self.draws[self.next % self.draws.len()];
        self.next += 1;
        draw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duel::NUMBERS;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn rng_draws_stay_in_pool_and_cover_it() {
        let mut source = RngDraw(StdRng::seed_from_u64(7));
        let mut seen = [false; 5];

        for _ in 0..500 {
            let n = source.draw(&NUMBERS);
            assert!(NUMBERS.contains(&n));
            seen[(n - 1) as usize] = true;
        }

        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn seeded_draws_repeat() {
        let mut a = RngDraw(StdRng::seed_from_u64(42));
        let mut b = RngDraw(StdRng::seed_from_u64(42));

        for _ in 0..50 {
            assert_eq!(a.draw(&NUMBERS), b.draw(&NUMBERS));
        }
    }

    #[test]
    fn rigged_cycles() {
        let mut source = Rigged::new(&[2, 4]);
        let drawn: Vec<_> = (0..5).map(|_| source.draw(&NUMBERS)).collect();
        assert_eq!(drawn, [2u8, 4, 2, 4, 2]);
    }
}

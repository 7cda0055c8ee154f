// Word colors: a fixed candy palette that reads well on the chocolate
// background.

use rand::Rng;

pub const PALETTE: [&str; 7] = [
    "#FF7AB6", "#FFA442", "#FFF755", "#96FF73", "#59D0FF", "#CF9BFF", "#65FFEB",
];

/// Pick a palette color uniformly at random.
pub fn random_color<R: Rng>(rng: &mut R) -> &'static str {
    PALETTE[rng.random_range(0..PALETTE.len())]
}

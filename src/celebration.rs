use rand::seq::SliceRandom;
use std::time::SystemTime;

/// One balloon in the results celebration
#[derive(Debug, Clone)]
pub struct Balloon {
    pub x: f64,
    pub y: f64,
    pub vel_y: f64,
    pub sway_phase: f64,
    pub sway_amp: f64,
    pub symbol: char,
    pub color_index: usize,
    pub age: f64,
    pub max_age: f64,
}

impl Balloon {
    fn new(x: f64, y: f64) -> Self {
        use rand::Rng;
        let mut rng = rand::thread_rng();

        Self {
            x,
            y,
            vel_y: rng.gen_range(-6.0..-2.5),
            sway_phase: rng.gen_range(0.0..std::f64::consts::TAU),
            sway_amp: rng.gen_range(0.5..2.0),
            symbol: *['🎈', '🎉', '✨', '🎊', '⭐']
                .choose(&mut rng)
                .unwrap_or(&'🎈'),
            color_index: rng.gen_range(0..7),
            age: 0.0,
            max_age: rng.gen_range(2.5..4.5),
        }
    }

    /// Balloons rise and sway; there is no gravity pulling them back down.
    fn update(&mut self, dt: f64) -> bool {
        self.y += self.vel_y * dt;
        self.x += (self.age * 4.0 + self.sway_phase).sin() * self.sway_amp * dt;
        self.age += dt;
        self.age < self.max_age
    }
}

/// Animation played over the results screen for an excellent tier
#[derive(Debug)]
pub struct CelebrationAnimation {
    pub balloons: Vec<Balloon>,
    pub start_time: SystemTime,
    pub duration: f64, // seconds
    pub is_active: bool,
    pub terminal_width: f64,
    pub terminal_height: f64,
}

impl CelebrationAnimation {
    pub fn new() -> Self {
        Self {
            balloons: Vec::new(),
            start_time: SystemTime::now(),
            duration: 3.0,
            is_active: false,
            terminal_width: 80.0,
            terminal_height: 24.0,
        }
    }

    /// Release a batch of balloons from the bottom edge of the screen
    pub fn start(&mut self, width: u16, height: u16) {
        use rand::Rng;
        let mut rng = rand::thread_rng();

        self.balloons.clear();
        self.start_time = SystemTime::now();
        self.is_active = true;
        self.terminal_width = width as f64;
        self.terminal_height = height as f64;

        for _ in 0..30 {
            let x = rng.gen_range(0.0..width.max(1) as f64);
            let y = height as f64 + rng.gen_range(0.0..4.0);
            self.balloons.push(Balloon::new(x, y));
        }
    }

    pub fn update(&mut self) {
        if !self.is_active {
            return;
        }

        let elapsed = self.start_time.elapsed().unwrap_or_default().as_secs_f64();
        if elapsed >= self.duration {
            self.is_active = false;
            self.balloons.clear();
            return;
        }

        let dt = 0.1; // Fixed timestep for animation
        let width = self.terminal_width;
        self.balloons.retain_mut(|balloon| {
            let still_alive = balloon.update(dt);

            // Drop balloons once they drift past the top or the sides
            let buffer = 3.0;
            let off_screen =
                balloon.y < -buffer || balloon.x < -buffer || balloon.x > width + buffer;
            still_alive && !off_screen
        });
    }
}

impl Default for CelebrationAnimation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balloons_rise() {
        let mut balloon = Balloon::new(10.0, 20.0);
        let initial_y = balloon.y;

        let still_alive = balloon.update(0.1);

        assert!(still_alive);
        assert!(balloon.y < initial_y, "balloons should move up");
    }

    #[test]
    fn test_balloon_expires_after_max_age() {
        let mut balloon = Balloon::new(10.0, 20.0);
        balloon.max_age = 0.2;

        assert!(balloon.update(0.1));
        assert!(!balloon.update(0.1));
    }

    #[test]
    fn test_celebration_starts_inactive() {
        let celebration = CelebrationAnimation::new();

        assert!(!celebration.is_active);
        assert!(celebration.balloons.is_empty());
    }

    #[test]
    fn test_start_releases_balloons() {
        let mut celebration = CelebrationAnimation::new();
        celebration.start(80, 24);

        assert!(celebration.is_active);
        assert_eq!(celebration.balloons.len(), 30);

        // All released from at or below the bottom edge
        for balloon in &celebration.balloons {
            assert!(balloon.y >= 24.0);
        }
    }

    #[test]
    fn test_update_moves_balloons() {
        let mut celebration = CelebrationAnimation::new();
        celebration.start(80, 24);

        let initial_positions: Vec<(f64, f64)> =
            celebration.balloons.iter().map(|b| (b.x, b.y)).collect();

        for _ in 0..5 {
            celebration.update();
        }

        let moved = celebration
            .balloons
            .iter()
            .zip(initial_positions.iter())
            .filter(|(b, &(_, init_y))| b.y < init_y)
            .count();
        assert!(moved > 0, "balloons should move after updates");
    }

    #[test]
    fn test_off_screen_balloons_removed() {
        let mut celebration = CelebrationAnimation::new();
        celebration.start(20, 10);

        let mut stray = Balloon::new(100.0, 5.0);
        stray.max_age = 100.0;
        celebration.balloons.push(stray);

        celebration.update();

        for balloon in &celebration.balloons {
            assert!(balloon.x <= 23.0, "off-screen balloon should be removed");
        }
    }

    #[test]
    fn test_animation_ends_after_duration() {
        let mut celebration = CelebrationAnimation::new();
        celebration.start(80, 24);
        celebration.duration = 0.0;

        celebration.update();

        assert!(!celebration.is_active);
        assert!(celebration.balloons.is_empty());
    }
}

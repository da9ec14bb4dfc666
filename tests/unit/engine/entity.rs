use super::*;

#[derive(Clone, Debug, PartialEq)]
struct Spark {
    id: u32,
    life: i32,
    y: f64,
}

impl Entity for Spark {
    type Env = f64;

    fn step(&mut self, gravity: &f64, _rng: &mut SketchRng) {
        self.y += gravity;
        self.life -= 1;
    }

    fn is_expired(&self) -> bool {
        self.life <= 0
    }

    fn render(&self, painter: &mut Painter<'_>) {
        painter.circle(0.0, self.y, 2.0);
    }
}

fn store(lives: &[i32]) -> EntityStore<Spark> {
    let mut s = EntityStore::new();
    s.extend(lives.iter().enumerate().map(|(i, &life)| Spark {
        id: i as u32,
        life,
        y: 0.0,
    }));
    s
}

#[test]
fn prune_removes_exactly_expired_and_keeps_order() {
    let mut s = store(&[1, 3, 1, 2, 5]);
    let mut rng = SketchRng::seeded(1);
    s.step_all(&0.5, &mut rng);
    let survivors_before: Vec<Spark> = s.iter().filter(|e| !e.is_expired()).cloned().collect();

    assert_eq!(s.prune(), 2);
    let after: Vec<Spark> = s.iter().cloned().collect();
    assert_eq!(after, survivors_before);
    assert_eq!(after.iter().map(|e| e.id).collect::<Vec<_>>(), vec![1, 3, 4]);
    assert_eq!(s.spawned(), 5);
    assert_eq!(s.retired(), 2);
}

#[test]
fn prune_with_nothing_expired_is_a_no_op() {
    let mut s = store(&[4, 4]);
    assert_eq!(s.prune(), 0);
    assert_eq!(s.len(), 2);
}

#[test]
fn render_all_emits_one_op_per_entity() {
    let s = store(&[1, 1, 1]);
    let mut frame = crate::scene::draw::Frame::new();
    let mut p = Painter::new(crate::foundation::core::Canvas::LANDSCAPE, &mut frame);
    s.render_all(&mut p);
    assert_eq!(frame.ops.len(), 3);
}

#[test]
fn clear_counts_as_retired() {
    let mut s = store(&[1, 2]);
    s.clear();
    assert!(s.is_empty());
    assert_eq!(s.retired(), 2);
}

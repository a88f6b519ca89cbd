use anyhow::Result;
use chrono::{DateTime, Utc};
use log::*;

use crate::catalog::{self, Source};
use crate::error::FetchError;
use crate::favorites::FavoritesStore;
use crate::filter::{self, Category, Predicate};
use crate::model::{FavoriteEntry, Record, Schema};
use crate::selector::{self, RandomSource};
use crate::storage::KeyValueStore;
use crate::timer::Countdown;
use crate::tips::{self, Tip};
use crate::view::{self, Card, View};

/// All application state, owned in one place. User actions are methods on it.
pub struct App<S, R> {
    schema: Schema,
    records: Vec<Record>,
    category: Category,
    predicates: Vec<Predicate>,
    selected: Option<Record>,
    favorites: FavoritesStore<S>,
    timer: Countdown,
    rng: R,
}

impl<S: KeyValueStore, R: RandomSource> App<S, R> {
    pub fn new(schema: Schema, records: Vec<Record>, store: S, rng: R) -> Self {
        App {
            schema,
            records,
            category: Category::All,
            predicates: vec![],
            selected: None,
            favorites: FavoritesStore::new(store),
            timer: Countdown::default(),
            rng,
        }
    }

    pub fn load<Src: Source + ?Sized>(
        source: &Src,
        schema: Schema,
        store: S,
        rng: R,
    ) -> std::result::Result<Self, FetchError> {
        let records = catalog::load(source, &schema)?;
        Ok(Self::new(schema, records, store, rng))
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn categories(&self) -> Vec<String> {
        catalog::categories(&self.records, &self.schema)
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn set_category(&mut self, category: Category) {
        debug!("Category set to {}", category);
        self.category = category;
    }

    /// Restricts to records with the schema's flag set. No-op for schemas without one.
    pub fn set_flagged_only(&mut self, on: bool) {
        let flag = match self.schema.flag {
            Some(f) => Predicate::Flagged(f.to_owned()),
            None => {
                warn!("Schema {} has no flag column", self.schema.name);
                return;
            }
        };
        self.predicates.retain(|p| *p != flag);
        if on {
            self.predicates.push(flag);
        }
    }

    /// Restricts to cafes and food spots
    pub fn set_cafe_only(&mut self, on: bool) {
        self.predicates.retain(|p| *p != Predicate::Cafe);
        if on {
            self.predicates.push(Predicate::Cafe);
        }
    }

    pub fn visible(&self) -> Vec<&Record> {
        filter::filter(&self.records, &self.schema, &self.category, &self.predicates)
    }

    /// Every visible record as a card, in catalog order
    pub fn cards(&self) -> Vec<Card> {
        self.visible().into_iter()
            .map(|r| view::card(&self.schema, r))
            .collect()
    }

    pub fn tip_of_week(&self, now: DateTime<Utc>) -> Option<Tip> {
        tips::tip_of_week(&self.records, &self.schema, now)
    }

    pub fn selected(&self) -> Option<&Record> {
        self.selected.as_ref()
    }

    pub fn show_first(&mut self) -> Option<&Record> {
        let picked = selector::pick_first(&self.visible()).map(|r| (*r).clone());
        self.select(picked)
    }

    pub fn show_random(&mut self) -> Option<&Record> {
        let visible = filter::filter(&self.records, &self.schema, &self.category, &self.predicates);
        let picked = selector::pick_random(&visible, &mut self.rng).map(|r| (*r).clone());
        self.select(picked)
    }

    /// Random category, then a random record within it
    pub fn surprise(&mut self) -> Option<&Record> {
        let categories = self.categories();
        let category = selector::pick_random(&categories, &mut self.rng).cloned();
        match category {
            Some(c) => self.set_category(Category::Key(c)),
            None => return self.select(None),
        }
        self.show_random()
    }

    fn select(&mut self, record: Option<Record>) -> Option<&Record> {
        if record.is_none() {
            info!("No record matches category {} with {} predicate(s)", self.category, self.predicates.len());
        }
        self.selected = record;
        self.selected.as_ref()
    }

    /// Saves the selected record. Returns false when nothing is selected.
    pub fn favorite_selected(&mut self) -> Result<bool> {
        match self.selected.clone() {
            Some(record) => {
                self.favorites.add(record)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn favorites(&self) -> Vec<FavoriteEntry> {
        self.favorites.list()
    }

    pub fn remove_favorite(&mut self, index: usize) -> Result<()> {
        self.favorites.remove(index)
    }

    pub fn clear_favorites(&mut self) -> Result<()> {
        self.favorites.clear()
    }

    pub fn timer_mut(&mut self) -> &mut Countdown {
        &mut self.timer
    }

    pub fn view(&self) -> View {
        view::render(&self.schema, self.selected.as_ref(), &self.favorites.list(), &self.timer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::tests::Scripted;
    use crate::storage::MemoryStore;

    const CONTENT: &str = "issue,quote,tip\nStress,Q1,T1\nAnxiety,Q2,T2\nStress,Q3,T3";
    const PLACES: &str = "id,name,category,spooky\n1,Fort,Hidden Hangout,true\n2,Lake,Hidden Hangout,false\n3,Ghat,Scary Road,true";

    fn content_app(script: &[usize]) -> App<MemoryStore, Scripted> {
        App::load(CONTENT, Schema::CONTENT, MemoryStore::new(), Scripted::new(script)).unwrap()
    }

    #[test]
    fn categories_from_records() {
        assert_eq!(content_app(&[]).categories(), vec!["Anxiety", "Stress"]);
    }

    #[test]
    fn show_first_of_category() {
        let mut app = content_app(&[]);
        app.set_category(Category::Key("Stress".into()));
        assert_eq!(app.show_first().unwrap().get("quote"), "Q1");
        assert_eq!(app.selected().unwrap().get("quote"), "Q1");
    }

    #[test]
    fn show_random_uses_source() {
        let mut app = content_app(&[1]);
        app.set_category(Category::Key("Stress".into()));
        assert_eq!(app.show_random().unwrap().get("quote"), "Q3");
    }

    #[test]
    fn empty_filter_clears_selection() {
        let mut app = content_app(&[]);
        app.show_first();
        app.set_category(Category::Key("Nope".into()));
        assert!(app.show_random().is_none());
        assert!(app.selected().is_none());
        assert!(!app.favorite_selected().unwrap());
    }

    #[test]
    fn surprise_picks_category_then_record() {
        let mut app = content_app(&[1, 0]);
        let picked = app.surprise().unwrap().clone();
        assert_eq!(app.category(), &Category::Key("Stress".into()));
        assert_eq!(picked.get("quote"), "Q1");
    }

    #[test]
    fn favorites_flow() {
        let mut app = content_app(&[]);
        app.show_first();
        assert!(app.favorite_selected().unwrap());
        app.set_category(Category::Key("Anxiety".into()));
        app.show_first();
        app.favorite_selected().unwrap();

        let favs = app.favorites();
        assert_eq!(favs.len(), 2);
        assert_eq!(favs[0].record.get("quote"), "Q2");

        app.remove_favorite(0).unwrap();
        assert_eq!(app.favorites()[0].record.get("quote"), "Q1");
        app.clear_favorites().unwrap();
        assert!(app.favorites().is_empty());
    }

    #[test]
    fn flagged_only_for_places() {
        let mut app = App::load(PLACES, Schema::PLACES, MemoryStore::new(), Scripted::new(&[])).unwrap();
        app.set_flagged_only(true);
        app.set_flagged_only(true);
        let names: Vec<&str> = app.visible().into_iter().map(|r| r.get("name")).collect();
        assert_eq!(names, vec!["Fort", "Ghat"]);

        app.set_category(Category::Key("Hidden Hangout".into()));
        assert_eq!(app.visible().len(), 1);
        app.set_flagged_only(false);
        assert_eq!(app.visible().len(), 2);
    }

    #[test]
    fn cards_cover_every_visible_record() {
        let mut app = App::load(PLACES, Schema::PLACES, MemoryStore::new(), Scripted::new(&[])).unwrap();
        let titles: Vec<String> = app.cards().into_iter().map(|c| c.title).collect();
        assert_eq!(titles, vec!["Fort", "Lake", "Ghat"]);

        app.set_flagged_only(true);
        let cards = app.cards();
        assert_eq!(cards.len(), 2);
        assert!(cards.iter().all(|c| c.badges.contains(&"Spooky".to_owned())));

        app.set_category(Category::Key("Nope".into()));
        assert!(app.cards().is_empty());
    }

    #[test]
    fn cafe_only_toggles() {
        let csv = "id,name,category\n1,Irani Cafe,Hidden Hangout\n2,Fort,Hidden Hangout\n3,Thali Ghar,Food";
        let mut app = App::load(csv, Schema::PLACES, MemoryStore::new(), Scripted::new(&[])).unwrap();
        app.set_cafe_only(true);
        app.set_cafe_only(true);
        let titles: Vec<String> = app.cards().into_iter().map(|c| c.title).collect();
        assert_eq!(titles, vec!["Irani Cafe", "Thali Ghar"]);
        app.set_cafe_only(false);
        assert_eq!(app.cards().len(), 3);
    }

    #[test]
    fn tip_of_week_by_schema() {
        let now = Utc::now();
        let places = App::load(PLACES, Schema::PLACES, MemoryStore::new(), Scripted::new(&[])).unwrap();
        let tip = places.tip_of_week(now).unwrap();
        assert!(tips::SECRET_TIPS.iter().any(|(title, _)| *title == tip.title));

        let content = content_app(&[]);
        let tip = content.tip_of_week(now).unwrap();
        assert!(["T1", "T2", "T3"].contains(&tip.text.as_str()));
    }

    #[test]
    fn view_reflects_state() {
        let mut app = content_app(&[]);
        app.show_first();
        app.timer_mut().reset(61);
        let view = app.view();
        assert_eq!(view.selected.unwrap().title, "Stress");
        assert_eq!(view.timer, "01:01");
        assert!(view.favorites.is_empty());
    }
}

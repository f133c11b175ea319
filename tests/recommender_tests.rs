#[cfg(test)]
mod tests {
    use recipe_engine::id_resolver::IdResolver;
    use recipe_engine::recipe_model::{MealType, Recipe};
    use recipe_engine::recommender::{recommend, score_candidate};

    fn menu() -> Vec<Recipe> {
        vec![
            Recipe::new("recipe-001", "Lasagne")
                .with_cuisine("italian")
                .with_meal_type(MealType::Dinner)
                .with_times(30, 60)
                .with_dietary_tag("vegetarian"),
            Recipe::new("recipe-002", "Bruschetta")
                .with_cuisine("italian")
                .with_meal_type(MealType::Snack)
                .with_times(10, 5)
                .with_dietary_tag("vegetarian")
                .with_dietary_tag("vegan"),
            Recipe::new("recipe-003", "Nachos")
                .with_cuisine("mexican")
                .with_meal_type(MealType::Snack)
                .with_times(20, 10),
            Recipe::new("recipe-004", "Risotto")
                .with_cuisine("italian")
                .with_meal_type(MealType::Dinner)
                .with_times(20, 30),
            Recipe::new("recipe-005", "Pancakes")
                .with_cuisine("american")
                .with_meal_type(MealType::Breakfast)
                .with_times(30, 15),
        ]
    }

    #[test]
    fn test_scores_against_dinner_reference() {
        let recipes = menu();
        let reference = &recipes[0];

        let cases = vec![
            ("recipe-002", 50 + 30 + 20 + 10),
            ("recipe-003", 30),
            ("recipe-004", 50),
            ("recipe-005", 0),
        ];
        for (id, expected) in cases {
            let candidate = recipes.iter().find(|r| r.id.as_deref() == Some(id)).unwrap();
            assert_eq!(score_candidate(reference, candidate), expected, "{}", id);
        }
    }

    #[test]
    fn test_recommend_for_resolved_reference() {
        let recipes = menu();
        let lookup = IdResolver::default().lookup("Recipe-001", &recipes);
        let reference = lookup.recipe.unwrap();

        let picks = recommend(reference, &recipes, 3);
        let ids: Vec<&str> = picks.iter().map(|p| p.recipe.display_id()).collect();
        assert_eq!(ids, vec!["recipe-002", "recipe-004", "recipe-003"]);
        assert!(picks.iter().all(|p| p.recipe.id != reference.id));
    }

    #[test]
    fn test_recommend_count_larger_than_collection() {
        let recipes = menu();
        let picks = recommend(&recipes[4], &recipes, 10);
        assert_eq!(picks.len(), recipes.len() - 1);
        assert!(picks.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_recommend_zero_count() {
        let recipes = menu();
        assert!(recommend(&recipes[0], &recipes, 0).is_empty());
    }
}

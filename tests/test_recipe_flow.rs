use fridge_mate::{
    FridgeConfig, FridgeMate, LoadState, RecipeDetailScreen, RecipeListScreen, RecipeMatches,
    RecipeResolver,
};
use mockito::{Matcher, Server, ServerGuard};

fn resolver(server: &ServerGuard) -> RecipeResolver {
    FridgeMate::builder()
        .config(FridgeConfig::default())
        .api_key("test-key")
        .base_url(server.url())
        .build()
        .unwrap()
        .resolver()
}

fn details_body(id: u64, title: &str, servings: Option<u32>) -> String {
    let mut body = serde_json::json!({
        "id": id,
        "title": title,
        "image": format!("https://img.spoonacular.com/recipes/{}-556x370.jpg", id),
        "readyInMinutes": 20,
        "sourceUrl": format!("https://example.com/{}", id),
        "instructions": "<ol><li>Whisk&nbsp;eggs.</li><li>Fry.</li></ol>",
        "extendedIngredients": [
            {"id": 1123, "name": "egg", "original": "2 large eggs"},
            {"id": 20081, "name": "flour", "original": "1 cup flour"}
        ]
    });
    if let Some(servings) = servings {
        body["servings"] = servings.into();
    }
    body.to_string()
}

#[tokio::test]
async fn test_egg_and_flour_keeps_only_complete_recipes() {
    let mut server = Server::new_async().await;
    let find = server
        .mock("GET", "/recipes/findByIngredients")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("ingredients".into(), "egg,flour".into()),
            Matcher::UrlEncoded("number".into(), "10".into()),
            Matcher::UrlEncoded("ranking".into(), "1".into()),
            Matcher::UrlEncoded("ignorePantry".into(), "true".into()),
        ]))
        .with_status(200)
        .with_body(
            r#"[{"id": 101, "title": "Pancakes", "usedIngredientCount": 2, "missedIngredientCount": 1},
                {"id": 102, "title": "Crepes", "usedIngredientCount": 2, "missedIngredientCount": 0},
                {"id": 103, "title": "Dumplings", "usedIngredientCount": 2, "missedIngredientCount": 3}]"#,
        )
        .expect(1)
        .create_async()
        .await;
    let _complete = server
        .mock("GET", "/recipes/101/information")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(details_body(101, "Pancakes", Some(4)))
        .create_async()
        .await;
    let _no_servings = server
        .mock("GET", "/recipes/102/information")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(details_body(102, "Crepes", None))
        .create_async()
        .await;
    let _broken = server
        .mock("GET", "/recipes/103/information")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let resolver = resolver(&server);
    let mut screen = RecipeListScreen::new("egg, flour");
    screen.load(&resolver).await;

    let recipes = match screen.recipes.data() {
        Some(RecipeMatches::Found(recipes)) => recipes.clone(),
        other => panic!("expected recipes, got {:?}", other),
    };
    assert_eq!(recipes.len(), 1);
    assert_eq!(recipes[0].id, 101);
    assert_eq!(recipes[0].title, "Pancakes");
    assert_eq!(recipes[0].servings, 4);
    assert_eq!(recipes[0].ready_in_minutes, 20);
    assert_eq!(recipes[0].ingredients, vec!["2 large eggs", "1 cup flour"]);
    find.assert_async().await;
}

#[tokio::test]
async fn test_no_matches_shows_empty_state() {
    let mut server = Server::new_async().await;
    let _find = server
        .mock("GET", "/recipes/findByIngredients")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let resolver = resolver(&server);
    let mut screen = RecipeListScreen::new("durian");
    screen.load(&resolver).await;
    assert_eq!(
        screen.recipes,
        LoadState::Loaded(RecipeMatches::NoneFound)
    );
}

#[tokio::test]
async fn test_empty_selection_sends_nothing() {
    let mut server = Server::new_async().await;
    let find = server
        .mock("GET", "/recipes/findByIngredients")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let result = resolver(&server).find_recipes(" , ").await.unwrap();
    assert_eq!(result, RecipeMatches::NoneFound);
    find.assert_async().await;
}

#[tokio::test]
async fn test_detail_screen_cleans_instructions() {
    let mut server = Server::new_async().await;
    let _details = server
        .mock("GET", "/recipes/101/information")
        .match_query(Matcher::UrlEncoded("apiKey".into(), "test-key".into()))
        .with_status(200)
        .with_body(details_body(101, "Pancakes", Some(4)))
        .create_async()
        .await;

    let resolver = resolver(&server);
    let mut screen = RecipeDetailScreen::new(101);
    screen.load(&resolver).await;

    let recipe = screen.recipe.data().unwrap();
    assert_eq!(recipe.method_of_preparation(), "Whisk eggs.Fry.");
    assert_eq!(recipe.ingredient_lines(), vec!["2 large eggs", "1 cup flour"]);
}

#[tokio::test]
async fn test_detail_failure_shows_status() {
    let mut server = Server::new_async().await;
    let _details = server
        .mock("GET", "/recipes/5/information")
        .match_query(Matcher::Any)
        .with_status(404)
        .create_async()
        .await;

    let resolver = resolver(&server);
    let mut screen = RecipeDetailScreen::new(5);
    screen.load(&resolver).await;
    assert_eq!(
        screen.recipe.error(),
        Some("Request failed with status 404")
    );
}

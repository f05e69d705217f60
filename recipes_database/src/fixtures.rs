//! Sample data for development and end-to-end testing.

use recipes_auth::{ArgonHasher, Role};
use sqlx::PgConnection;
use thiserror::Error;
use tracing::info;

use crate::entities::{
    CategoryMutation,
    NewCategory,
    NewRecipe,
    NewUser,
    RecipeMutation,
    UserMutation,
    UserQueryError,
    UserRoleMutation,
};
use crate::QueryError;


pub struct FixtureUser {
    pub email: &'static str,
    pub password: &'static str,
    pub roles: &'static [Role],
}

pub struct FixtureRecipe {
    pub title: &'static str,
    pub content: &'static str,
}

pub struct FixtureCategory {
    pub title: &'static str,
    pub recipes: &'static [FixtureRecipe],
}


pub const FIXTURE_ADMINISTRATOR: FixtureUser = FixtureUser {
    email: "admin@example.com",
    password: "admin1234",
    roles: &[Role::User, Role::Administrator],
};

pub const FIXTURE_USER: FixtureUser = FixtureUser {
    email: "user@example.com",
    password: "user1234",
    roles: &[Role::User],
};

pub const FIXTURE_USERS: &[FixtureUser] = &[FIXTURE_ADMINISTRATOR, FIXTURE_USER];


#[rustfmt::skip]
pub const FIXTURE_CATEGORIES: &[FixtureCategory] = &[
    FixtureCategory {
        title: "Breakfast",
        recipes: &[
            FixtureRecipe {
                title: "Scrambled eggs",
                content: "Whisk four eggs with a pinch of salt. Cook slowly in butter, stirring constantly.",
            },
            FixtureRecipe {
                title: "Overnight oats",
                content: "Mix oats, milk and yoghurt in a jar. Leave in the fridge overnight and top with fruit.",
            },
        ],
    },
    FixtureCategory {
        title: "Soups",
        recipes: &[
            FixtureRecipe {
                title: "Tomato soup",
                content: "Roast tomatoes with garlic and onion, blend with stock and season to taste.",
            },
            FixtureRecipe {
                title: "Chicken broth",
                content: "Simmer chicken bones with carrots, celery and onion for three hours, then strain.",
            },
        ],
    },
    FixtureCategory {
        title: "Main courses",
        recipes: &[
            FixtureRecipe {
                title: "Spaghetti carbonara",
                content: "Fry guanciale, toss with hot spaghetti, then stir in eggs and pecorino off the heat.",
            },
            FixtureRecipe {
                title: "Vegetable curry",
                content: "Fry onions and spices, add vegetables and coconut milk, and simmer until tender.",
            },
        ],
    },
    FixtureCategory {
        title: "Salads",
        recipes: &[
            FixtureRecipe {
                title: "Greek salad",
                content: "Combine tomatoes, cucumber, red onion, olives and feta. Dress with olive oil.",
            },
        ],
    },
    FixtureCategory {
        title: "Desserts",
        recipes: &[
            FixtureRecipe {
                title: "Chocolate mousse",
                content: "Fold melted chocolate into whipped egg whites and chill for at least four hours.",
            },
            FixtureRecipe {
                title: "Apple crumble",
                content: "Cover sliced apples with a crumble of flour, butter and sugar. Bake until golden.",
            },
        ],
    },
    FixtureCategory {
        title: "Sauces",
        recipes: &[],
    },
];



#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed to execute query")]
    QueryError {
        #[from]
        #[source]
        error: QueryError,
    },

    #[error("failed to create fixture user")]
    UserError {
        #[from]
        #[source]
        error: UserQueryError,
    },

    #[error("sqlx error")]
    SqlxError {
        #[from]
        #[source]
        error: sqlx::Error,
    },
}


/// What [`AppFixtures::load`] inserted.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct LoadedFixtures {
    pub users: usize,
    pub categories: usize,
    pub recipes: usize,
}


pub struct AppFixtures;

impl AppFixtures {
    /// Inserts the sample users, categories and recipes.
    ///
    /// Run this inside a transaction (pass `&mut *transaction`) to make it all-or-nothing.
    pub async fn load(
        database_connection: &mut PgConnection,
        hasher: &ArgonHasher,
    ) -> Result<LoadedFixtures, FixtureError> {
        let mut loaded = LoadedFixtures::default();

        for fixture_user in FIXTURE_USERS {
            let user = UserMutation::create(
                &mut *database_connection,
                hasher,
                NewUser {
                    email: fixture_user.email.to_string(),
                    password: fixture_user.password.to_string(),
                },
            )
            .await?;

            UserRoleMutation::add_roles_to_user(
                &mut *database_connection,
                user.id,
                fixture_user.roles,
            )
            .await?;

            loaded.users += 1;
        }

        for fixture_category in FIXTURE_CATEGORIES {
            let category = CategoryMutation::create(
                &mut *database_connection,
                NewCategory {
                    title: fixture_category.title.to_string(),
                },
            )
            .await?;

            loaded.categories += 1;

            for fixture_recipe in fixture_category.recipes {
                RecipeMutation::create(
                    &mut *database_connection,
                    NewRecipe {
                        title: fixture_recipe.title.to_string(),
                        content: fixture_recipe.content.to_string(),
                        category_id: category.id,
                    },
                )
                .await?;

                loaded.recipes += 1;
            }
        }

        info!(
            users = loaded.users,
            categories = loaded.categories,
            recipes = loaded.recipes,
            "Loaded fixtures."
        );

        Ok(loaded)
    }

    /// Deletes all recipes, categories, user roles and users, and resets identity sequences.
    pub async fn purge(database_connection: &mut PgConnection) -> Result<(), FixtureError> {
        sqlx::query(
            "TRUNCATE TABLE \
                recipes.recipe, recipes.category, recipes.user_role, recipes.user \
                RESTART IDENTITY",
        )
        .execute(database_connection)
        .await?;

        info!("Purged all database tables.");

        Ok(())
    }
}


#[cfg(test)]
mod test {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn exactly_one_fixture_category_is_empty() {
        let empty_categories = FIXTURE_CATEGORIES
            .iter()
            .filter(|category| category.recipes.is_empty())
            .map(|category| category.title)
            .collect::<Vec<_>>();

        assert_eq!(empty_categories, vec!["Sauces"]);
    }

    #[test]
    fn fixture_titles_fit_column_limits() {
        let mut seen_category_titles = HashSet::new();

        for category in FIXTURE_CATEGORIES {
            assert!((3..=64).contains(&category.title.chars().count()));
            assert!(seen_category_titles.insert(category.title));

            for recipe in category.recipes {
                assert!((3..=255).contains(&recipe.title.chars().count()));
                assert!((1..=10000).contains(&recipe.content.chars().count()));
            }
        }
    }

    #[test]
    fn only_the_administrator_can_manage_content() {
        assert!(FIXTURE_ADMINISTRATOR.roles.contains(&Role::Administrator));
        assert!(!FIXTURE_USER.roles.contains(&Role::Administrator));
    }
}
